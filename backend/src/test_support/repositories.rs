//! In-memory record repositories mirroring the PostgreSQL adapters.
//!
//! Rows keep insertion order, partial updates touch only supplied fields and
//! user emails stay unique, so services behave the same against either
//! backend.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    RecordPersistenceError, RecordRepository, SiteSettingsRepository, UserRepository,
};
use crate::domain::{
    AiProduct, AiProductChanges, AiProductId, EmailAddress, Record, RecordStatus, SiteSettings,
    SiteSettingsChanges, SiteSettingsId, User, UserChanges, UserId,
};

fn poisoned<T>(_: T) -> RecordPersistenceError {
    RecordPersistenceError::connection("in-memory table lock poisoned")
}

/// Ordered rows of one record type.
struct RecordTable<R> {
    rows: RwLock<Vec<R>>,
}

impl<R> Default for RecordTable<R> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }
}

impl<R> RecordTable<R>
where
    R: Record,
    R::Id: PartialEq,
{
    fn with_rows(rows: Vec<R>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<R>>, RecordPersistenceError> {
        self.rows.read().map_err(poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<R>>, RecordPersistenceError> {
        self.rows.write().map_err(poisoned)
    }

    fn len(&self) -> usize {
        self.read().map(|rows| rows.len()).unwrap_or_default()
    }

    fn list(&self) -> Result<Vec<R>, RecordPersistenceError> {
        Ok(self.read()?.clone())
    }

    fn find(&self, id: &R::Id) -> Result<Option<R>, RecordPersistenceError> {
        Ok(self.read()?.iter().find(|row| row.id() == id).cloned())
    }

    fn update(&self, id: &R::Id, changes: &R::Changes) -> Result<Option<R>, RecordPersistenceError> {
        let mut rows = self.write()?;
        Ok(rows.iter_mut().find(|row| row.id() == id).map(|row| {
            row.apply(changes);
            row.clone()
        }))
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// `UserRepository` holding accounts in a vector.
#[derive(Default)]
pub struct InMemoryUserRepository {
    table: RecordTable<User>,
}

impl InMemoryUserRepository {
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            table: RecordTable::with_rows(users),
        }
    }

    /// Number of stored accounts.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn duplicate_email() -> RecordPersistenceError {
    RecordPersistenceError::conflict("unique constraint users_email_key violated")
}

#[async_trait]
impl RecordRepository<User> for InMemoryUserRepository {
    async fn list(&self) -> Result<Vec<User>, RecordPersistenceError> {
        self.table.list()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RecordPersistenceError> {
        self.table.find(id)
    }

    async fn update(
        &self,
        id: &UserId,
        changes: &UserChanges,
    ) -> Result<Option<User>, RecordPersistenceError> {
        if let Some(email) = &changes.email {
            let rows = self.table.read()?;
            if rows.iter().any(|user| user.email() == email && user.id() != id) {
                return Err(duplicate_email());
            }
        }
        self.table.update(id, changes)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), RecordPersistenceError> {
        let mut rows = self.table.write()?;
        if rows.iter().any(|existing| existing.email() == user.email()) {
            return Err(duplicate_email());
        }
        rows.push(user.clone());
        Ok(())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, RecordPersistenceError> {
        Ok(self
            .table
            .read()?
            .iter()
            .find(|user| user.email() == email)
            .cloned())
    }

    async fn delete(&self, id: &UserId) -> Result<bool, RecordPersistenceError> {
        let mut rows = self.table.write()?;
        let before = rows.len();
        rows.retain(|user| user.id() != id);
        Ok(rows.len() < before)
    }

    async fn count(&self, status: Option<RecordStatus>) -> Result<u64, RecordPersistenceError> {
        let rows = self.table.read()?;
        let matching = rows
            .iter()
            .filter(|user| status.is_none_or(|wanted| user.status() == wanted))
            .count();
        Ok(matching as u64)
    }
}

// ---------------------------------------------------------------------------
// AI products
// ---------------------------------------------------------------------------

/// `RecordRepository<AiProduct>` seeded up front, like the SQL table.
#[derive(Default)]
pub struct InMemoryAiProductRepository {
    table: RecordTable<AiProduct>,
}

impl InMemoryAiProductRepository {
    pub fn with_products(products: Vec<AiProduct>) -> Self {
        Self {
            table: RecordTable::with_rows(products),
        }
    }
}

#[async_trait]
impl RecordRepository<AiProduct> for InMemoryAiProductRepository {
    async fn list(&self) -> Result<Vec<AiProduct>, RecordPersistenceError> {
        self.table.list()
    }

    async fn find_by_id(
        &self,
        id: &AiProductId,
    ) -> Result<Option<AiProduct>, RecordPersistenceError> {
        self.table.find(id)
    }

    async fn update(
        &self,
        id: &AiProductId,
        changes: &AiProductChanges,
    ) -> Result<Option<AiProduct>, RecordPersistenceError> {
        self.table.update(id, changes)
    }
}

// ---------------------------------------------------------------------------
// Site settings
// ---------------------------------------------------------------------------

/// `SiteSettingsRepository` where the first pushed row is "the" settings.
#[derive(Default)]
pub struct InMemorySiteSettingsRepository {
    table: RecordTable<SiteSettings>,
}

impl InMemorySiteSettingsRepository {
    pub fn with_settings(settings: SiteSettings) -> Self {
        Self {
            table: RecordTable::with_rows(vec![settings]),
        }
    }

    /// Number of stored settings rows.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RecordRepository<SiteSettings> for InMemorySiteSettingsRepository {
    async fn list(&self) -> Result<Vec<SiteSettings>, RecordPersistenceError> {
        self.table.list()
    }

    async fn find_by_id(
        &self,
        id: &SiteSettingsId,
    ) -> Result<Option<SiteSettings>, RecordPersistenceError> {
        self.table.find(id)
    }

    async fn update(
        &self,
        id: &SiteSettingsId,
        changes: &SiteSettingsChanges,
    ) -> Result<Option<SiteSettings>, RecordPersistenceError> {
        self.table.update(id, changes)
    }
}

#[async_trait]
impl SiteSettingsRepository for InMemorySiteSettingsRepository {
    async fn first(&self) -> Result<Option<SiteSettings>, RecordPersistenceError> {
        Ok(self.table.read()?.first().cloned())
    }

    async fn insert(&self, settings: &SiteSettings) -> Result<(), RecordPersistenceError> {
        self.table.write()?.push(settings.clone());
        Ok(())
    }
}
