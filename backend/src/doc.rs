//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every page, form and probe handler from the inbound
//! layer together with the view models they render. Domain types stay free
//! of utoipa: their schemas are declared in
//! [`crate::inbound::http::schemas`].
//!
//! The generated document is served by Swagger UI in debug builds and
//! printed by the `openapi-dump` binary.

use crate::inbound::http::accounts::{LoginForm, RegisterForm};
use crate::inbound::http::ai_products::{AiProductView, EditAiProductForm};
use crate::inbound::http::flash::{Flash, FlashCategory};
use crate::inbound::http::pages::CurrentUserView;
use crate::inbound::http::reports::UserStatisticsView;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, PageSchema};
use crate::inbound::http::site_settings::{SiteSettingsForm, SiteSettingsView};
use crate::inbound::http::users::{EditUserForm, UserView};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Private session cookie issued by POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the admin panel.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Admin panel backend",
        description = "Session-authenticated administration of users, AI products and site settings."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::pages::home,
        crate::inbound::http::pages::admin_dashboard,
        crate::inbound::http::accounts::register_page,
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login_page,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::logout,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::edit_user_page,
        crate::inbound::http::users::edit_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::ai_products::list_ai_products,
        crate::inbound::http::ai_products::edit_ai_product_page,
        crate::inbound::http::ai_products::edit_ai_product,
        crate::inbound::http::site_settings::site_settings_page,
        crate::inbound::http::site_settings::save_site_settings,
        crate::inbound::http::reports::reports,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        PageSchema,
        Flash,
        FlashCategory,
        CurrentUserView,
        RegisterForm,
        LoginForm,
        UserView,
        EditUserForm,
        AiProductView,
        EditAiProductForm,
        SiteSettingsView,
        SiteSettingsForm,
        UserStatisticsView,
    )),
    tags(
        (name = "pages", description = "Landing page and dashboard"),
        (name = "accounts", description = "Registration, login and logout"),
        (name = "users", description = "User administration"),
        (name = "ai-products", description = "AI product catalogue maintenance"),
        (name = "site-settings", description = "Site-wide configuration"),
        (name = "reports", description = "User statistics"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
