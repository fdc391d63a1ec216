//! PostgreSQL-backed AI product repository.
//!
//! Products have no insert or delete path; rows arrive through SQL.

use std::str::FromStr;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RecordPersistenceError, RecordRepository};
use crate::domain::{
    AiProduct, AiProductChanges, AiProductId, ProductName, Record, RecordChanges, RecordStatus,
};

use super::diesel_basic_error_mapping::{invalid_row, map_diesel_error, map_pool_error};
use super::models::{AiProductRow, AiProductUpdate};
use super::pool::DbPool;
use super::schema::ai_products;

/// Diesel-backed `RecordRepository<AiProduct>`.
#[derive(Clone)]
pub struct DieselAiProductRepository {
    pool: DbPool,
}

impl DieselAiProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_product(row: AiProductRow) -> Result<AiProduct, RecordPersistenceError> {
    let name = ProductName::new(&row.name).map_err(|err| invalid_row(AiProduct::KIND, err))?;
    let status =
        RecordStatus::from_str(&row.status).map_err(|err| invalid_row(AiProduct::KIND, err))?;
    Ok(AiProduct::new(AiProductId::from_uuid(row.id), name, status))
}

#[async_trait]
impl RecordRepository<AiProduct> for DieselAiProductRepository {
    async fn list(&self) -> Result<Vec<AiProduct>, RecordPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<AiProductRow> = ai_products::table
            .order((ai_products::created_at.asc(), ai_products::id.asc()))
            .select(AiProductRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_product).collect()
    }

    async fn find_by_id(
        &self,
        id: &AiProductId,
    ) -> Result<Option<AiProduct>, RecordPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<AiProductRow> = ai_products::table
            .find(*id.as_uuid())
            .select(AiProductRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_product).transpose()
    }

    async fn update(
        &self,
        id: &AiProductId,
        changes: &AiProductChanges,
    ) -> Result<Option<AiProduct>, RecordPersistenceError> {
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }
        let update = AiProductUpdate {
            name: changes.name.as_ref().map(AsRef::as_ref),
            status: changes.status.map(RecordStatus::as_str),
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<AiProductRow> = diesel::update(ai_products::table.find(*id.as_uuid()))
            .set(&update)
            .returning(AiProductRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_product).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn rows_with_unknown_status_are_rejected() {
        let row = AiProductRow {
            id: uuid::Uuid::new_v4(),
            name: "Writer".to_owned(),
            status: "retired".to_owned(),
            created_at: Utc::now(),
        };
        let err = row_to_product(row).expect_err("invalid status");
        assert!(err.to_string().contains("AI product"));
    }

    #[test]
    fn status_is_read_case_insensitively() {
        let row = AiProductRow {
            id: uuid::Uuid::new_v4(),
            name: "Writer".to_owned(),
            status: "inactive".to_owned(),
            created_at: Utc::now(),
        };
        let product = row_to_product(row).expect("valid row");
        assert_eq!(product.status(), RecordStatus::Inactive);
    }
}
