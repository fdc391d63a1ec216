//! Site settings handlers.
//!
//! ```text
//! GET  /site-settings   -> content: {"configured": false, "settings": null}
//! POST /site-settings   site_name=Shop&contact_email=hi@shop.io&whatsapp_number=+1555&currency=USD
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use super::flash::{Flash, SETTINGS_UPDATED};
use super::guard::AuthenticatedUser;
use super::pages::{render, see_other};
use super::schemas::{ErrorSchema, PageSchema};
use super::session::SessionContext;
use super::state::HttpState;
use super::validation::site_settings_error;
use crate::domain::site_settings::{CURRENCY_MAX, SITE_NAME_MAX, WHATSAPP_NUMBER_MAX, contact_email};
use crate::domain::{SettingText, SettingsField, SiteSettings, SiteSettingsChanges};
use crate::inbound::http::ApiResult;

const SITE_SETTINGS_PAGE: &str = "/site-settings";

/// Stored settings as shown on the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettingsView {
    pub site_name: String,
    pub contact_email: String,
    pub whatsapp_number: String,
    pub currency: String,
}

impl From<&SiteSettings> for SiteSettingsView {
    fn from(settings: &SiteSettings) -> Self {
        Self {
            site_name: settings.site_name().as_ref().to_owned(),
            contact_email: settings.contact_email().to_string(),
            whatsapp_number: settings.whatsapp_number().as_ref().to_owned(),
            currency: settings.currency().as_ref().to_owned(),
        }
    }
}

/// Settings form. The first save needs every field; later saves may
/// submit a subset.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct SiteSettingsForm {
    pub site_name: Option<String>,
    pub contact_email: Option<String>,
    pub whatsapp_number: Option<String>,
    pub currency: Option<String>,
}

fn text(
    field: SettingsField,
    value: Option<String>,
    max: usize,
) -> ApiResult<Option<SettingText>> {
    value
        .map(|raw| SettingText::new(field, raw, max))
        .transpose()
        .map_err(site_settings_error)
}

impl SiteSettingsForm {
    fn into_changes(self) -> ApiResult<SiteSettingsChanges> {
        Ok(SiteSettingsChanges {
            site_name: text(SettingsField::SiteName, self.site_name, SITE_NAME_MAX)?,
            contact_email: self
                .contact_email
                .as_deref()
                .map(contact_email)
                .transpose()
                .map_err(site_settings_error)?,
            whatsapp_number: text(
                SettingsField::WhatsappNumber,
                self.whatsapp_number,
                WHATSAPP_NUMBER_MAX,
            )?,
            currency: text(SettingsField::Currency, self.currency, CURRENCY_MAX)?,
        })
    }
}

/// Settings form, empty until the first save.
#[utoipa::path(
    get,
    path = "/site-settings",
    responses(
        (status = 200, description = "Settings page; content.settings is a SiteSettingsView or null", body = PageSchema),
        (status = 303, description = "Login required")
    ),
    tags = ["site-settings"],
    operation_id = "siteSettingsPage"
)]
#[get("/site-settings")]
pub async fn site_settings_page(
    state: web::Data<HttpState>,
    session: SessionContext,
    user: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    let settings = state.site_settings.current().await?;
    render(
        &session,
        "Site Settings",
        Some(&user.0),
        json!({
            "configured": settings.is_some(),
            "settings": settings.as_ref().map(SiteSettingsView::from),
        }),
    )
}

/// Create or update the settings singleton.
#[utoipa::path(
    post,
    path = "/site-settings",
    request_body(content = SiteSettingsForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Saved; redirect to /site-settings"),
        (status = 400, description = "Invalid or incomplete form", body = ErrorSchema)
    ),
    tags = ["site-settings"],
    operation_id = "saveSiteSettings"
)]
#[post("/site-settings")]
pub async fn save_site_settings(
    state: web::Data<HttpState>,
    session: SessionContext,
    _user: AuthenticatedUser,
    form: web::Form<SiteSettingsForm>,
) -> ApiResult<HttpResponse> {
    let changes = form.into_inner().into_changes()?;
    state.site_settings.save(changes).await?;
    session.push_flash(Flash::success(SETTINGS_UPDATED))?;
    Ok(see_other(SITE_SETTINGS_PAGE))
}
