//! Port abstraction for the singleton settings row.
use async_trait::async_trait;

use crate::domain::SiteSettings;

use super::{RecordPersistenceError, RecordRepository};

/// Settings storage. Only the first row is meaningful.
#[async_trait]
pub trait SiteSettingsRepository: RecordRepository<SiteSettings> {
    /// The first stored row, if any.
    async fn first(&self) -> Result<Option<SiteSettings>, RecordPersistenceError>;

    /// Store the initial settings row.
    async fn insert(&self, settings: &SiteSettings) -> Result<(), RecordPersistenceError>;
}
