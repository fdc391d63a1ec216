//! Admin panel backend: session-authenticated administration of users,
//! AI products and site settings.
//!
//! The crate follows a hexagonal layout. [`domain`] holds records, services
//! and ports; [`inbound`] adapts HTTP onto the services; [`outbound`]
//! implements the ports against PostgreSQL, Argon2 and in-process stores.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
