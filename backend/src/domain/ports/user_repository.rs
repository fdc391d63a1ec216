//! Port abstraction for user persistence adapters.
use async_trait::async_trait;

use crate::domain::{EmailAddress, RecordStatus, User, UserId};

use super::{RecordPersistenceError, RecordRepository};

/// User storage on top of the generic record operations.
///
/// Email uniqueness is enforced by the store: `insert`, and `update` calls
/// that change the email, fail with [`RecordPersistenceError::Conflict`] when
/// another row already holds the address.
#[async_trait]
pub trait UserRepository: RecordRepository<User> {
    /// Persist a newly registered user.
    async fn insert(&self, user: &User) -> Result<(), RecordPersistenceError>;

    /// Look up the account that logs in with `email`.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, RecordPersistenceError>;

    /// Remove a user; `false` when no row matched.
    async fn delete(&self, id: &UserId) -> Result<bool, RecordPersistenceError>;

    /// Count users, optionally restricted to one status.
    async fn count(&self, status: Option<RecordStatus>) -> Result<u64, RecordPersistenceError>;
}
