//! JSON page models consumed by the templating front end, plus the landing
//! page and dashboard shell.
//!
//! ```text
//! GET /                 -> {"title":"Home","flashes":[],"content":{}}
//! GET /admin-dashboard  -> {"title":"Admin Dashboard","currentUser":{..},...}
//! ```

use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, get};
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

use super::flash::Flash;
use super::guard::{AuthenticatedUser, CurrentIdentity};
use super::schemas::{ErrorSchema, PageSchema};
use super::session::SessionContext;
use crate::domain::User;
use crate::inbound::http::ApiResult;

/// Name and email of the signed-in account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CurrentUserView {
    pub name: String,
    pub email: String,
}

impl From<&User> for CurrentUserView {
    fn from(user: &User) -> Self {
        Self {
            name: user.name().to_string(),
            email: user.email().to_string(),
        }
    }
}

/// Rendered page: title, pending flashes, optional user and page content.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub title: String,
    pub flashes: Vec<Flash>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_user: Option<CurrentUserView>,
    pub content: T,
}

/// Render `content` as a page, draining the session's flash queue.
pub(crate) fn render<T: Serialize>(
    session: &SessionContext,
    title: &str,
    current_user: Option<&User>,
    content: T,
) -> ApiResult<HttpResponse> {
    let page = Page {
        title: title.to_owned(),
        flashes: session.take_flashes()?,
        current_user: current_user.map(CurrentUserView::from),
        content,
    };
    Ok(HttpResponse::Ok().json(page))
}

/// `303 See Other` to `location`.
pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, location))
        .finish()
}

/// Landing page.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Landing page", body = PageSchema),
        (status = 503, description = "Session store unavailable", body = ErrorSchema)
    ),
    tags = ["pages"],
    operation_id = "home",
    security([])
)]
#[get("/")]
pub async fn home(session: SessionContext, identity: CurrentIdentity) -> ApiResult<HttpResponse> {
    render(&session, "Home", identity.user(), json!({}))
}

/// Dashboard shell linking the admin sections.
#[utoipa::path(
    get,
    path = "/admin-dashboard",
    responses(
        (status = 200, description = "Dashboard", body = PageSchema),
        (status = 303, description = "Login required")
    ),
    tags = ["pages"],
    operation_id = "adminDashboard"
)]
#[get("/admin-dashboard")]
pub async fn admin_dashboard(
    session: SessionContext,
    user: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    render(
        &session,
        "Admin Dashboard",
        Some(&user.0),
        json!({
            "sections": [
                {"title": "Users", "href": "/users"},
                {"title": "AI Management", "href": "/ai-management"},
                {"title": "Site Settings", "href": "/site-settings"},
                {"title": "Reports", "href": "/reports"},
            ]
        }),
    )
}
