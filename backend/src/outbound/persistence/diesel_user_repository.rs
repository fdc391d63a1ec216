//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use std::str::FromStr;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RecordPersistenceError, RecordRepository, UserRepository};
use crate::domain::{
    EmailAddress, PasswordHash, Record, RecordChanges, RecordStatus, User, UserChanges, UserId,
    UserName,
};

use super::diesel_basic_error_mapping::{invalid_row, map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the user repository ports.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_user(row: UserRow) -> Result<User, RecordPersistenceError> {
    let invalid = |reason: &dyn std::fmt::Display| invalid_row(User::KIND, reason);
    Ok(User::new(
        UserId::from_uuid(row.id),
        UserName::new(&row.name).map_err(|err| invalid(&err))?,
        EmailAddress::new(&row.email).map_err(|err| invalid(&err))?,
        PasswordHash::new(row.password_hash),
        RecordStatus::from_str(&row.status).map_err(|err| invalid(&err))?,
    ))
}

fn changes_to_update(changes: &UserChanges) -> UserUpdate<'_> {
    UserUpdate {
        name: changes.name.as_ref().map(AsRef::as_ref),
        email: changes.email.as_ref().map(AsRef::as_ref),
        status: changes.status.map(RecordStatus::as_str),
    }
}

#[async_trait]
impl RecordRepository<User> for DieselUserRepository {
    async fn list(&self) -> Result<Vec<User>, RecordPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = users::table
            .order((users::created_at.asc(), users::id.asc()))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_user).collect()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RecordPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .find(*id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn update(
        &self,
        id: &UserId,
        changes: &UserChanges,
    ) -> Result<Option<User>, RecordPersistenceError> {
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = diesel::update(users::table.find(*id.as_uuid()))
            .set(&changes_to_update(changes))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_user).transpose()
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), RecordPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewUserRow {
            id: *user.id().as_uuid(),
            name: user.name().as_ref(),
            email: user.email().as_ref(),
            password_hash: user.password_hash().as_str(),
            status: user.status().as_str(),
        };
        diesel::insert_into(users::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, RecordPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn delete(&self, id: &UserId) -> Result<bool, RecordPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(users::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }

    async fn count(&self, status: Option<RecordStatus>) -> Result<u64, RecordPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = match status {
            Some(status) => {
                users::table
                    .filter(users::status.eq(status.as_str()))
                    .count()
                    .get_result::<i64>(&mut conn)
                    .await
            }
            None => users::table.count().get_result::<i64>(&mut conn).await,
        }
        .map_err(map_diesel_error)?;
        u64::try_from(total).map_err(|_| RecordPersistenceError::query("negative row count"))
    }
}
