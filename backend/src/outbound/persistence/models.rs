//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{ai_products, site_settings, users};

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub status: String,
    #[expect(dead_code, reason = "selected for ordering and audit queries only")]
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub status: &'a str,
}

/// Partial update; `None` columns are left untouched.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub status: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// AI products
// ---------------------------------------------------------------------------

/// Row struct for reading from the ai_products table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = ai_products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AiProductRow {
    pub id: Uuid,
    pub name: String,
    pub status: String,
    #[expect(dead_code, reason = "selected for ordering and audit queries only")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = ai_products)]
pub(crate) struct AiProductUpdate<'a> {
    pub name: Option<&'a str>,
    pub status: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Site settings
// ---------------------------------------------------------------------------

/// Row struct for reading from the site_settings table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = site_settings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SiteSettingsRow {
    pub id: Uuid,
    pub site_name: String,
    pub contact_email: String,
    pub whatsapp_number: String,
    pub currency: String,
    #[expect(dead_code, reason = "selected for ordering and audit queries only")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = site_settings)]
pub(crate) struct NewSiteSettingsRow<'a> {
    pub id: Uuid,
    pub site_name: &'a str,
    pub contact_email: &'a str,
    pub whatsapp_number: &'a str,
    pub currency: &'a str,
}

#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = site_settings)]
pub(crate) struct SiteSettingsUpdate<'a> {
    pub site_name: Option<&'a str>,
    pub contact_email: Option<&'a str>,
    pub whatsapp_number: Option<&'a str>,
    pub currency: Option<&'a str>,
}
