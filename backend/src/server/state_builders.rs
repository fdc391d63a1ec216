//! Builders wiring the PostgreSQL adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use admin_backend::inbound::http::state::{HttpState, HttpStatePorts};
use admin_backend::outbound::credentials::Argon2PasswordHasher;
use admin_backend::outbound::persistence::{
    DbPool, DieselAiProductRepository, DieselSiteSettingsRepository, DieselUserRepository,
};
use admin_backend::outbound::sessions::InMemorySessionStore;

/// Build handler state over the database pool.
///
/// Session bindings live in process memory, so every login is dropped when
/// the server restarts.
pub(super) fn build_http_state(pool: &DbPool) -> web::Data<HttpState> {
    let ports = HttpStatePorts {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        ai_products: Arc::new(DieselAiProductRepository::new(pool.clone())),
        site_settings: Arc::new(DieselSiteSettingsRepository::new(pool.clone())),
        sessions: Arc::new(InMemorySessionStore::default()),
        hasher: Arc::new(Argon2PasswordHasher::new()),
        clock: Arc::new(DefaultClock),
    };
    web::Data::new(HttpState::new(ports))
}
