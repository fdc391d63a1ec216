//! Generic CRUD service shared by every managed record type.

use std::marker::PhantomData;
use std::sync::Arc;

use tracing::warn;

use crate::domain::ports::{RecordPersistenceError, RecordRepository};
use crate::domain::{Error, Record, RecordChanges};

/// Map repository failures to domain errors for the given record kind.
pub(crate) fn map_record_error(kind: &str, error: RecordPersistenceError) -> Error {
    match error {
        RecordPersistenceError::Connection { message } => {
            warn!(kind, %message, "record store unavailable");
            Error::service_unavailable(format!("{kind} store is unavailable"))
        }
        RecordPersistenceError::Query { message } => Error::internal(message),
        RecordPersistenceError::Conflict { message } => Error::conflict(message),
    }
}

/// List, fetch and partially update records of type `R` stored behind `P`.
///
/// `P` may be a trait object, so the same service serves `dyn UserRepository`
/// and `dyn RecordRepository<AiProduct>` alike.
pub struct RecordService<R, P: ?Sized> {
    repository: Arc<P>,
    _record: PhantomData<fn() -> R>,
}

impl<R, P: ?Sized> Clone for RecordService<R, P> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            _record: PhantomData,
        }
    }
}

impl<R, P> RecordService<R, P>
where
    R: Record,
    P: RecordRepository<R> + ?Sized,
{
    pub fn new(repository: Arc<P>) -> Self {
        Self {
            repository,
            _record: PhantomData,
        }
    }

    /// Every record in insertion order.
    pub async fn list(&self) -> Result<Vec<R>, Error> {
        self.repository
            .list()
            .await
            .map_err(|err| map_record_error(R::KIND, err))
    }

    /// Fetch one record or fail with `NotFound`.
    pub async fn get(&self, id: &R::Id) -> Result<R, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(|err| map_record_error(R::KIND, err))?
            .ok_or_else(|| not_found::<R>(id))
    }

    /// Overwrite the supplied fields atomically and return the stored record.
    ///
    /// An empty change set is a read.
    pub async fn update(&self, id: &R::Id, changes: &R::Changes) -> Result<R, Error> {
        if changes.is_empty() {
            return self.get(id).await;
        }
        self.repository
            .update(id, changes)
            .await
            .map_err(|err| map_record_error(R::KIND, err))?
            .ok_or_else(|| not_found::<R>(id))
    }
}

fn not_found<R: Record>(id: &R::Id) -> Error {
    Error::not_found(format!("{} {id} not found", R::KIND))
}
