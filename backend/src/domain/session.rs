//! Session lifecycle: bind a fresh token to a verified user, resolve it on
//! later requests, and unbind it on logout.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::ports::{SessionStore, SessionStoreError, UserLoader};
use crate::domain::{Error, User, UserId, VerifiedUser};

/// Default lifetime of a session binding, in minutes.
pub const DEFAULT_SESSION_TTL_MINUTES: i64 = 120;

/// Opaque bearer token carried in the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionToken(Uuid);

impl SessionToken {
    /// Generate a fresh random token.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a token read back from the client; `None` when malformed.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw).ok().map(Self)
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Server-side record of who a token authenticates and until when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionBinding {
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
}

/// Who is making the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Anonymous,
    Authenticated(User),
}

/// Gate every protected operation: yield the user or fail `Unauthorized`.
///
/// # Examples
/// ```
/// use admin_backend::domain::{ErrorCode, Identity, require_authenticated};
///
/// let err = require_authenticated(Identity::Anonymous).unwrap_err();
/// assert_eq!(err.code(), ErrorCode::Unauthorized);
/// ```
pub fn require_authenticated(identity: Identity) -> Result<User, Error> {
    match identity {
        Identity::Authenticated(user) => Ok(user),
        Identity::Anonymous => Err(Error::unauthorized("login required")),
    }
}

fn map_store_error(error: SessionStoreError) -> Error {
    warn!(%error, "session store failure");
    Error::service_unavailable("session store is unavailable")
}

/// Issues, resolves and revokes session tokens.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    users: Arc<dyn UserLoader>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl SessionManager {
    pub fn new(
        store: Arc<dyn SessionStore>,
        users: Arc<dyn UserLoader>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            users,
            clock,
            ttl: Duration::minutes(DEFAULT_SESSION_TTL_MINUTES),
        }
    }

    /// Override the binding lifetime.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Start a session for a user whose credentials were just verified.
    pub async fn login(&self, verified: &VerifiedUser) -> Result<SessionToken, Error> {
        let now = self.clock.utc();
        let pruned = self
            .store
            .prune_expired(now)
            .await
            .map_err(map_store_error)?;
        if pruned > 0 {
            debug!(pruned, "expired sessions pruned");
        }

        let token = SessionToken::generate();
        let user_id = *verified.user().id();
        self.store
            .bind(
                &token,
                SessionBinding {
                    user_id,
                    expires_at: now + self.ttl,
                },
            )
            .await
            .map_err(map_store_error)?;
        info!(%user_id, "session started");
        Ok(token)
    }

    /// Resolve the identity behind an optional token.
    ///
    /// Unknown, expired and orphaned tokens all resolve to
    /// [`Identity::Anonymous`]; expired and orphaned bindings are removed.
    pub async fn current_identity(&self, token: Option<&SessionToken>) -> Result<Identity, Error> {
        let Some(token) = token else {
            return Ok(Identity::Anonymous);
        };
        let Some(binding) = self.store.resolve(token).await.map_err(map_store_error)? else {
            return Ok(Identity::Anonymous);
        };

        if binding.expires_at <= self.clock.utc() {
            debug!(user_id = %binding.user_id, "session expired");
            self.store.unbind(token).await.map_err(map_store_error)?;
            return Ok(Identity::Anonymous);
        }

        match self.users.load_user(&binding.user_id).await? {
            Some(user) => Ok(Identity::Authenticated(user)),
            None => {
                debug!(user_id = %binding.user_id, "session user no longer exists");
                self.store.unbind(token).await.map_err(map_store_error)?;
                Ok(Identity::Anonymous)
            }
        }
    }

    /// End a session. Unknown tokens are a no-op.
    pub async fn logout(&self, token: &SessionToken) -> Result<(), Error> {
        self.store.unbind(token).await.map_err(map_store_error)
    }
}
