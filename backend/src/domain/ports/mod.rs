//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod password_hasher;
mod record_repository;
mod session_store;
mod site_settings_repository;
mod user_loader;
mod user_repository;

pub use password_hasher::{PasswordHashError, PasswordHasher};
pub use record_repository::{RecordPersistenceError, RecordRepository};
pub use session_store::{SessionStore, SessionStoreError};
pub use site_settings_repository::SiteSettingsRepository;
pub use user_loader::UserLoader;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
#[cfg(test)]
pub use session_store::MockSessionStore;
#[cfg(test)]
pub use user_loader::MockUserLoader;
