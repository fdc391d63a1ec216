//! Lookup used by the session manager to resolve a bound user id.
use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Load the current state of a user by id.
///
/// `Ok(None)` means the account no longer exists.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserLoader: Send + Sync {
    async fn load_user(&self, id: &UserId) -> Result<Option<User>, Error>;
}
