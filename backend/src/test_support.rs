//! Test utilities for the backend crate.
//!
//! Shared by unit tests in `src/` and, through the `test-support` feature,
//! by integration tests in `tests/`.

mod clock;
pub mod http;
mod repositories;

use argon2::Params;

use crate::outbound::credentials::Argon2PasswordHasher;

pub use clock::MutableClock;
pub use repositories::{
    InMemoryAiProductRepository, InMemorySiteSettingsRepository, InMemoryUserRepository,
};

/// Argon2id hasher with minimum cost parameters so tests stay fast.
pub fn fast_password_hasher() -> Argon2PasswordHasher {
    let params = Params::new(
        Params::MIN_M_COST,
        Params::MIN_T_COST,
        Params::MIN_P_COST,
        None,
    )
    .unwrap_or_default();
    Argon2PasswordHasher::with_params(params)
}
