//! OpenAPI schema definitions for domain types and page envelopes.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.

use utoipa::ToSchema;

use super::flash::Flash;
use super::pages::CurrentUserView;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The form is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Login failed.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The requested record does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The write collides with an existing record, such as a taken email.
    #[schema(rename = "conflict")]
    Conflict,
    /// A backing store is temporarily unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// Error payload with machine-readable code and human-readable message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "name must not be empty")]
    message: String,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// `{ "field": ..., "code": ... }` for validation failures.
    details: Option<serde_json::Value>,
}

/// Envelope of every rendered page.
#[derive(ToSchema)]
#[schema(as = Page, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PageSchema {
    #[schema(example = "Users")]
    title: String,
    /// Notices queued by earlier requests, drained by this page.
    flashes: Vec<Flash>,
    /// Present when a user is signed in.
    current_user: Option<CurrentUserView>,
    /// Page-specific content.
    #[schema(value_type = Object)]
    content: serde_json::Value,
}
