//! Read and save the singleton site settings row.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::domain::ports::SiteSettingsRepository;
use crate::domain::record_service::{RecordService, map_record_error};
use crate::domain::{Error, Record, SiteSettings, SiteSettingsChanges};

/// Settings service operating on "the first row".
#[derive(Clone)]
pub struct SiteSettingsService {
    repository: Arc<dyn SiteSettingsRepository>,
    records: RecordService<SiteSettings, dyn SiteSettingsRepository>,
}

impl SiteSettingsService {
    pub fn new(repository: Arc<dyn SiteSettingsRepository>) -> Self {
        Self {
            records: RecordService::new(Arc::clone(&repository)),
            repository,
        }
    }

    /// Current settings, or `None` before the first save.
    pub async fn current(&self) -> Result<Option<SiteSettings>, Error> {
        self.repository
            .first()
            .await
            .map_err(|err| map_record_error(SiteSettings::KIND, err))
    }

    /// Update the first row with the supplied fields, creating it on the
    /// first save.
    pub async fn save(&self, changes: SiteSettingsChanges) -> Result<SiteSettings, Error> {
        if let Some(existing) = self.current().await? {
            return self.records.update(existing.id(), &changes).await;
        }

        let settings = SiteSettings::from_changes(changes).map_err(|err| {
            Error::invalid_request(err.to_string())
                .with_details(json!({ "field": err.field().as_str(), "code": "missing_field" }))
        })?;
        self.repository
            .insert(&settings)
            .await
            .map_err(|err| map_record_error(SiteSettings::KIND, err))?;
        info!(settings_id = %settings.id(), "site settings created");
        Ok(settings)
    }
}
