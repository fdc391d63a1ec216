//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON responses and status
//! codes. Protected pages answer an unauthenticated visitor with
//! [`LoginRequired`] instead, which redirects to the login form.

use std::fmt;

use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;
use url::form_urlencoded;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal("Internal server error");
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

/// Rejection raised by the access guard for anonymous visitors.
///
/// Renders as `303 See Other` pointing at `/login?next=<path>` so the login
/// form can send the user back once authenticated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequired {
    next: String,
}

impl LoginRequired {
    /// Redirect to the login form, returning to `next` afterwards.
    pub fn new(next: impl Into<String>) -> Self {
        Self { next: next.into() }
    }

    /// Path the visitor originally asked for.
    pub fn next(&self) -> &str {
        &self.next
    }

    /// `Location` header value for the redirect.
    pub fn location(&self) -> String {
        let encoded: String = form_urlencoded::byte_serialize(self.next.as_bytes()).collect();
        format!("/login?next={encoded}")
    }
}

impl fmt::Display for LoginRequired {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "login required to access {}", self.next)
    }
}

impl ResponseError for LoginRequired {
    fn status_code(&self) -> StatusCode {
        StatusCode::SEE_OTHER
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::SeeOther()
            .insert_header((LOCATION, self.location()))
            .finish()
    }
}

#[cfg(test)]
mod tests;
