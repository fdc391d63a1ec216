//! In-process session store.
//!
//! Bindings live only as long as the process. A restart logs everyone out,
//! which matches the cookie lifetime semantics closely enough for a single
//! replica deployment.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{SessionStore, SessionStoreError};
use crate::domain::{SessionBinding, SessionToken};

/// `SessionStore` backed by a lock-protected hash map.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    bindings: RwLock<HashMap<SessionToken, SessionBinding>>,
}

fn poisoned<T>(_: T) -> SessionStoreError {
    SessionStoreError::unavailable("session map lock poisoned")
}

impl InMemorySessionStore {
    /// Number of live bindings, expired or not.
    pub fn len(&self) -> usize {
        self.bindings.read().map(|map| map.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn bind(
        &self,
        token: &SessionToken,
        binding: SessionBinding,
    ) -> Result<(), SessionStoreError> {
        self.bindings.write().map_err(poisoned)?.insert(*token, binding);
        Ok(())
    }

    async fn resolve(
        &self,
        token: &SessionToken,
    ) -> Result<Option<SessionBinding>, SessionStoreError> {
        Ok(self.bindings.read().map_err(poisoned)?.get(token).cloned())
    }

    async fn unbind(&self, token: &SessionToken) -> Result<(), SessionStoreError> {
        self.bindings.write().map_err(poisoned)?.remove(token);
        Ok(())
    }

    async fn prune_expired(&self, now: DateTime<Utc>) -> Result<usize, SessionStoreError> {
        let mut bindings = self.bindings.write().map_err(poisoned)?;
        let before = bindings.len();
        bindings.retain(|_, binding| binding.expires_at > now);
        Ok(before - bindings.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;
    use chrono::Duration;

    fn binding(expires_at: DateTime<Utc>) -> SessionBinding {
        SessionBinding {
            user_id: UserId::random(),
            expires_at,
        }
    }

    #[tokio::test]
    async fn bind_resolve_unbind() {
        let store = InMemorySessionStore::default();
        let token = SessionToken::generate();
        let bound = binding(Utc::now() + Duration::hours(1));

        store.bind(&token, bound.clone()).await.expect("bind");
        assert_eq!(store.resolve(&token).await.expect("resolve"), Some(bound));

        store.unbind(&token).await.expect("unbind");
        assert_eq!(store.resolve(&token).await.expect("resolve"), None);
        store.unbind(&token).await.expect("second unbind is a no-op");
    }

    #[tokio::test]
    async fn prune_drops_only_expired_bindings() {
        let store = InMemorySessionStore::default();
        let now = Utc::now();
        let live = SessionToken::generate();
        store
            .bind(&SessionToken::generate(), binding(now - Duration::minutes(1)))
            .await
            .expect("bind");
        store
            .bind(&SessionToken::generate(), binding(now))
            .await
            .expect("bind");
        store
            .bind(&live, binding(now + Duration::minutes(1)))
            .await
            .expect("bind");

        let pruned = store.prune_expired(now).await.expect("prune");
        assert_eq!(pruned, 2);
        assert_eq!(store.len(), 1);
        assert!(store.resolve(&live).await.expect("resolve").is_some());
    }
}
