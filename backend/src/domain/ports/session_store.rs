//! Storage for session token bindings.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{SessionBinding, SessionToken};

use super::define_port_error;

define_port_error! {
    /// Errors raised by session store adapters.
    pub enum SessionStoreError {
        /// The store could not be reached or its state is unusable.
        Unavailable { message: String } => "session store unavailable: {message}",
    }
}

/// Maps opaque session tokens to the user they authenticate.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Record a new binding, replacing any binding for the same token.
    async fn bind(
        &self,
        token: &SessionToken,
        binding: SessionBinding,
    ) -> Result<(), SessionStoreError>;

    /// Look up the binding for `token`.
    async fn resolve(
        &self,
        token: &SessionToken,
    ) -> Result<Option<SessionBinding>, SessionStoreError>;

    /// Drop the binding for `token`; unknown tokens are ignored.
    async fn unbind(&self, token: &SessionToken) -> Result<(), SessionStoreError>;

    /// Drop every binding that expired at or before `now`.
    async fn prune_expired(&self, now: DateTime<Utc>) -> Result<usize, SessionStoreError>;
}
