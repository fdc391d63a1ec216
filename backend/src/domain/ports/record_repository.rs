//! Generic persistence port shared by every managed record type.

use async_trait::async_trait;

use crate::domain::Record;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by record repository adapters.
    pub enum RecordPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "record repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "record repository query failed: {message}",
        /// A uniqueness constraint rejected the write.
        Conflict { message: String } => "record repository conflict: {message}",
    }
}

/// CRUD operations the generic record service needs from storage.
///
/// `update` must overwrite only the supplied fields in a single atomic
/// statement and return the row as stored afterwards, or `None` when the id
/// does not exist.
#[async_trait]
pub trait RecordRepository<R: Record>: Send + Sync {
    /// Every row, in insertion order.
    async fn list(&self) -> Result<Vec<R>, RecordPersistenceError>;

    /// Fetch one row by identifier.
    async fn find_by_id(&self, id: &R::Id) -> Result<Option<R>, RecordPersistenceError>;

    /// Apply a partial update and return the stored row.
    async fn update(
        &self,
        id: &R::Id,
        changes: &R::Changes,
    ) -> Result<Option<R>, RecordPersistenceError>;
}
