//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::test::TestRequest;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Form-encoded `POST /login`.
pub fn login_request(email: &str, password: &str) -> TestRequest {
    TestRequest::post()
        .uri("/login")
        .set_form([("email", email), ("password", password)])
}

/// Form-encoded `POST /register`.
pub fn register_request(name: &str, email: &str, password: &str) -> TestRequest {
    TestRequest::post()
        .uri("/register")
        .set_form([("name", name), ("email", email), ("password", password)])
}

/// The `session` cookie set by `response`.
///
/// # Panics
///
/// Panics when the response did not set the cookie.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .unwrap_or_else(|| panic!("response did not set the session cookie"))
}

/// `Location` header of a redirect.
///
/// # Panics
///
/// Panics when the header is missing or not ASCII.
pub fn location<B>(response: &ServiceResponse<B>) -> String {
    response
        .headers()
        .get(actix_web::http::header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .unwrap_or_else(|| panic!("response has no Location header"))
}
