//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **credentials**: Argon2id password hashing
//! - **sessions**: in-process session token bindings
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod credentials;
pub mod persistence;
pub mod sessions;
