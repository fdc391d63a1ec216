//! In-memory wiring of the HTTP state for handler and flow tests.

use std::sync::Arc;

use chrono::Utc;

use super::{
    InMemoryAiProductRepository, InMemorySiteSettingsRepository, InMemoryUserRepository,
    MutableClock, fast_password_hasher,
};
use crate::domain::AiProduct;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::sessions::InMemorySessionStore;

/// Every adapter behind an [`HttpState`], kept reachable for assertions.
pub struct InMemoryBackend {
    pub users: Arc<InMemoryUserRepository>,
    pub ai_products: Arc<InMemoryAiProductRepository>,
    pub site_settings: Arc<InMemorySiteSettingsRepository>,
    pub sessions: Arc<InMemorySessionStore>,
    pub clock: Arc<MutableClock>,
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::with_ai_products(Vec::new())
    }
}

impl InMemoryBackend {
    /// Backend whose product table starts with `products`.
    pub fn with_ai_products(products: Vec<AiProduct>) -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::default()),
            ai_products: Arc::new(InMemoryAiProductRepository::with_products(products)),
            site_settings: Arc::new(InMemorySiteSettingsRepository::default()),
            sessions: Arc::new(InMemorySessionStore::default()),
            clock: Arc::new(MutableClock::new(Utc::now())),
        }
    }

    /// Build handler state sharing this backend's adapters.
    pub fn state(&self) -> HttpState {
        HttpState::new(HttpStatePorts {
            users: self.users.clone(),
            ai_products: self.ai_products.clone(),
            site_settings: self.site_settings.clone(),
            sessions: self.sessions.clone(),
            hasher: Arc::new(fast_password_hasher()),
            clock: self.clock.clone(),
        })
    }
}

/// Handler state over fresh, empty in-memory adapters.
pub fn in_memory_state() -> HttpState {
    InMemoryBackend::default().state()
}
