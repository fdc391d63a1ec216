//! HTTP inbound adapter serving the admin panel pages.
//!
//! Every page answers with a JSON page model; form posts answer
//! `303 See Other`. [`configure`] registers all handlers so the server and
//! tests mount exactly the same routes.

use actix_web::web;

pub mod accounts;
pub mod ai_products;
pub mod error;
pub mod flash;
pub mod guard;
pub mod health;
pub mod pages;
pub mod reports;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod site_settings;
pub mod state;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::{ApiResult, LoginRequired};

/// Register every page, form and probe handler.
///
/// Callers supply `web::Data<HttpState>`, `web::Data<HealthState>` and the
/// session middleware.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(pages::home)
        .service(pages::admin_dashboard)
        .service(accounts::register_page)
        .service(accounts::register)
        .service(accounts::login_page)
        .service(accounts::login)
        .service(accounts::logout)
        .service(users::list_users)
        .service(users::edit_user_page)
        .service(users::edit_user)
        .service(users::delete_user)
        .service(ai_products::list_ai_products)
        .service(ai_products::edit_ai_product_page)
        .service(ai_products::edit_ai_product)
        .service(site_settings::site_settings_page)
        .service(site_settings::save_site_settings)
        .service(reports::reports)
        .service(health::ready)
        .service(health::live);
}
