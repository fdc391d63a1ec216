//! PostgreSQL-backed site settings repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RecordPersistenceError, RecordRepository, SiteSettingsRepository};
use crate::domain::site_settings::{
    CURRENCY_MAX, SITE_NAME_MAX, SettingText, SettingsField, WHATSAPP_NUMBER_MAX, contact_email,
};
use crate::domain::{Record, RecordChanges, SiteSettings, SiteSettingsChanges, SiteSettingsId};

use super::diesel_basic_error_mapping::{invalid_row, map_diesel_error, map_pool_error};
use super::models::{NewSiteSettingsRow, SiteSettingsRow, SiteSettingsUpdate};
use super::pool::DbPool;
use super::schema::site_settings;

/// Diesel-backed `SiteSettingsRepository`.
#[derive(Clone)]
pub struct DieselSiteSettingsRepository {
    pool: DbPool,
}

impl DieselSiteSettingsRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_settings(row: SiteSettingsRow) -> Result<SiteSettings, RecordPersistenceError> {
    let invalid = |err| invalid_row(SiteSettings::KIND, err);
    Ok(SiteSettings::new(
        SiteSettingsId::from_uuid(row.id),
        SettingText::new(SettingsField::SiteName, &row.site_name, SITE_NAME_MAX)
            .map_err(invalid)?,
        contact_email(&row.contact_email).map_err(invalid)?,
        SettingText::new(
            SettingsField::WhatsappNumber,
            &row.whatsapp_number,
            WHATSAPP_NUMBER_MAX,
        )
        .map_err(invalid)?,
        SettingText::new(SettingsField::Currency, &row.currency, CURRENCY_MAX).map_err(invalid)?,
    ))
}

#[async_trait]
impl RecordRepository<SiteSettings> for DieselSiteSettingsRepository {
    async fn list(&self) -> Result<Vec<SiteSettings>, RecordPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<SiteSettingsRow> = site_settings::table
            .order((site_settings::created_at.asc(), site_settings::id.asc()))
            .select(SiteSettingsRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_settings).collect()
    }

    async fn find_by_id(
        &self,
        id: &SiteSettingsId,
    ) -> Result<Option<SiteSettings>, RecordPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<SiteSettingsRow> = site_settings::table
            .find(*id.as_uuid())
            .select(SiteSettingsRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_settings).transpose()
    }

    async fn update(
        &self,
        id: &SiteSettingsId,
        changes: &SiteSettingsChanges,
    ) -> Result<Option<SiteSettings>, RecordPersistenceError> {
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }
        let update = SiteSettingsUpdate {
            site_name: changes.site_name.as_ref().map(AsRef::as_ref),
            contact_email: changes.contact_email.as_ref().map(AsRef::as_ref),
            whatsapp_number: changes.whatsapp_number.as_ref().map(AsRef::as_ref),
            currency: changes.currency.as_ref().map(AsRef::as_ref),
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<SiteSettingsRow> =
            diesel::update(site_settings::table.find(*id.as_uuid()))
                .set(&update)
                .returning(SiteSettingsRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?;
        row.map(row_to_settings).transpose()
    }
}

#[async_trait]
impl SiteSettingsRepository for DieselSiteSettingsRepository {
    async fn first(&self) -> Result<Option<SiteSettings>, RecordPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<SiteSettingsRow> = site_settings::table
            .order((site_settings::created_at.asc(), site_settings::id.asc()))
            .select(SiteSettingsRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_settings).transpose()
    }

    async fn insert(&self, settings: &SiteSettings) -> Result<(), RecordPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewSiteSettingsRow {
            id: *settings.id().as_uuid(),
            site_name: settings.site_name().as_ref(),
            contact_email: settings.contact_email().as_ref(),
            whatsapp_number: settings.whatsapp_number().as_ref(),
            currency: settings.currency().as_ref(),
        };
        diesel::insert_into(site_settings::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
