//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the record repository ports backed by
//! PostgreSQL via Diesel with async support through `diesel-async` and `bb8`
//! connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain aggregates. Rows that no longer satisfy domain validation surface
//!   as query errors instead of being patched up.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Atomic partial updates**: edits are a single `UPDATE ... RETURNING`
//!   over the supplied columns only.
//!
//! # Example
//!
//! ```ignore
//! use admin_backend::outbound::persistence::{DbPool, PoolConfig, DieselUserRepository};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/admin_panel")).await?;
//! let repo = DieselUserRepository::new(pool);
//! ```

mod diesel_ai_product_repository;
mod diesel_basic_error_mapping;
mod diesel_site_settings_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_ai_product_repository::DieselAiProductRepository;
pub use diesel_site_settings_repository::DieselSiteSettingsRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
