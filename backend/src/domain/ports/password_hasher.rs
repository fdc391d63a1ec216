//! One-way password hashing port.

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Failures raised while producing a hash.
    pub enum PasswordHashError {
        /// The hashing backend rejected the input or its parameters.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// Salted, slow password hashing.
///
/// Implementations are CPU bound; services call them on the blocking pool.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash `password` with a fresh random salt.
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError>;

    /// Check `password` against a stored hash in constant time.
    ///
    /// A malformed stored hash verifies as `false`.
    fn verify(&self, password: &str, hash: &PasswordHash) -> bool;
}
