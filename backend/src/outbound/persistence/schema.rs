//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Admin panel accounts. `email` carries a unique constraint.
    users (id) {
        id -> Uuid,
        #[max_length = 100]
        name -> Varchar,
        #[max_length = 100]
        email -> Varchar,
        password_hash -> Text,
        #[max_length = 20]
        status -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// AI product catalogue.
    ai_products (id) {
        id -> Uuid,
        #[max_length = 100]
        name -> Varchar,
        #[max_length = 20]
        status -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Site configuration. Only the earliest row is used.
    site_settings (id) {
        id -> Uuid,
        #[max_length = 100]
        site_name -> Varchar,
        #[max_length = 100]
        contact_email -> Varchar,
        #[max_length = 20]
        whatsapp_number -> Varchar,
        #[max_length = 20]
        currency -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, ai_products, site_settings);
