//! Shared Diesel error mapping for the record repositories.

use tracing::debug;

use crate::domain::ports::RecordPersistenceError;

use super::pool::PoolError;

/// Map pool errors to connection failures.
pub(super) fn map_pool_error(error: PoolError) -> RecordPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RecordPersistenceError::connection(message)
        }
    }
}

/// Map Diesel errors to record persistence errors.
///
/// Unique violations become conflicts so callers can report a taken email
/// even when a concurrent insert slipped past the up-front check.
pub(super) fn map_diesel_error(error: diesel::result::Error) -> RecordPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => RecordPersistenceError::query("record not found"),
        DieselError::QueryBuilderError(_) => RecordPersistenceError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            RecordPersistenceError::conflict(
                info.constraint_name()
                    .map_or_else(|| "unique constraint violated".to_owned(), |name| {
                        format!("unique constraint {name} violated")
                    }),
            )
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RecordPersistenceError::connection("database connection error")
        }
        _ => RecordPersistenceError::query("database error"),
    }
}

/// A stored row failed domain validation.
pub(super) fn invalid_row(kind: &str, reason: impl std::fmt::Display) -> RecordPersistenceError {
    RecordPersistenceError::query(format!("stored {kind} row is invalid: {reason}"))
}
