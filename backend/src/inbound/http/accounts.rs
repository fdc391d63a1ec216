//! Account handlers: registration, login and logout.
//!
//! ```text
//! POST /register  name=Ann&email=ann@x.com&password=p1   -> 303 /login
//! POST /login     email=ann@x.com&password=p1            -> 303 /admin-dashboard
//! GET  /logout                                           -> 303 /
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use super::flash::{ACCOUNT_CREATED, Flash, LOGGED_OUT};
use super::guard::{AuthenticatedUser, CurrentIdentity};
use super::pages::{render, see_other};
use super::schemas::{ErrorSchema, PageSchema};
use super::session::SessionContext;
use super::state::HttpState;
use super::validation::{EMAIL, NAME, PASSWORD, credentials_error, required};
use crate::domain::{Error, ErrorCode, LoginCredentials, Registration};
use crate::inbound::http::ApiResult;

/// Where a successful login lands when no usable `next` was supplied.
pub const DEFAULT_LANDING: &str = "/admin-dashboard";

/// Sign-up form.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct RegisterForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login form. `next` may also arrive in the query string.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct LoginForm {
    pub email: Option<String>,
    pub password: Option<String>,
    pub next: Option<String>,
}

/// Page to return to after logging in.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct NextQuery {
    pub next: Option<String>,
}

/// Accept only same-site absolute paths as redirect targets.
fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path
        }
        _ => DEFAULT_LANDING,
    }
}

/// Queue a danger notice when `err` carries `code`, then hand the error back.
fn flash_failure(session: &SessionContext, code: ErrorCode, err: Error) -> Error {
    if err.code() != code {
        return err;
    }
    match session.push_flash(Flash::danger(err.message())) {
        Ok(()) => err,
        Err(flash_err) => flash_err,
    }
}

/// Sign-up page.
#[utoipa::path(
    get,
    path = "/register",
    responses((status = 200, description = "Sign-up page", body = PageSchema)),
    tags = ["accounts"],
    operation_id = "registerPage",
    security([])
)]
#[get("/register")]
pub async fn register_page(
    session: SessionContext,
    identity: CurrentIdentity,
) -> ApiResult<HttpResponse> {
    render(&session, "Register", identity.user(), json!({}))
}

/// Create an account, then send the visitor to the login form.
#[utoipa::path(
    post,
    path = "/register",
    request_body(content = RegisterForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Account created; redirect to /login"),
        (status = 400, description = "Invalid form", body = ErrorSchema),
        (status = 409, description = "Email already registered; a danger flash is queued", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<RegisterForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let name = required(NAME, form.name)?;
    let email = required(EMAIL, form.email)?;
    let password = required(PASSWORD, form.password)?;
    let registration =
        Registration::try_from_parts(&name, &email, &password).map_err(credentials_error)?;

    state
        .accounts
        .register(&registration)
        .await
        .map_err(|err| flash_failure(&session, ErrorCode::Conflict, err))?;
    session.push_flash(Flash::success(ACCOUNT_CREATED))?;
    Ok(see_other("/login"))
}

/// Login page.
#[utoipa::path(
    get,
    path = "/login",
    params(NextQuery),
    responses((status = 200, description = "Login page", body = PageSchema)),
    tags = ["accounts"],
    operation_id = "loginPage",
    security([])
)]
#[get("/login")]
pub async fn login_page(
    session: SessionContext,
    identity: CurrentIdentity,
    query: web::Query<NextQuery>,
) -> ApiResult<HttpResponse> {
    let next = query.into_inner().next;
    render(&session, "Login", identity.user(), json!({ "next": next }))
}

/// Verify credentials and start a session.
///
/// Any previous session token is revoked and the cookie renewed before the
/// new token is stored.
#[utoipa::path(
    post,
    path = "/login",
    params(NextQuery),
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Logged in; redirect to next or /admin-dashboard",
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid form", body = ErrorSchema),
        (status = 401, description = "Invalid credentials; a danger flash is queued", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<NextQuery>,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let email = required(EMAIL, form.email)?;
    let password = required(PASSWORD, form.password)?;
    let credentials =
        LoginCredentials::try_from_parts(&email, &password).map_err(credentials_error)?;

    let verified = state
        .accounts
        .authenticate(&credentials)
        .await
        .map_err(|err| flash_failure(&session, ErrorCode::Unauthorized, err))?;
    if let Some(previous) = session.token()? {
        state.sessions.logout(&previous).await?;
    }
    let token = state.sessions.login(&verified).await?;
    session.bind_token(&token)?;

    let next = form.next.or(query.into_inner().next);
    Ok(see_other(safe_next(next.as_deref())))
}

/// End the session and return to the landing page.
#[utoipa::path(
    get,
    path = "/logout",
    responses(
        (status = 303, description = "Logged out; redirect to /"),
        (status = 503, description = "Session store unavailable", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "logout"
)]
#[get("/logout")]
pub async fn logout(
    state: web::Data<HttpState>,
    session: SessionContext,
    user: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    if let Some(token) = session.token()? {
        state.sessions.logout(&token).await?;
    }
    session.clear_token();
    info!(user_id = %user.0.id(), "session ended");
    session.push_flash(Flash::info(LOGGED_OUT))?;
    Ok(see_other("/"))
}
