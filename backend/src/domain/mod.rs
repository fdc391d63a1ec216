//! Domain primitives, aggregates and services.
//!
//! Purpose: define the strongly typed records managed by the admin panel
//! (users, AI products, site settings), the ports adapters implement, and
//! the services inbound adapters call. Nothing here knows about HTTP or SQL.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Record / RecordStatus: shared CRUD vocabulary.
//! - User, AiProduct, SiteSettings: aggregates and their change sets.
//! - UserAccountService, SessionManager, SiteSettingsService,
//!   ReportingService, AiProductService: application services.

pub mod ai_product;
pub mod auth;
pub mod error;
pub mod ports;
pub mod record;
mod record_service;
pub mod reporting;
pub mod session;
pub mod site_settings;
mod site_settings_service;
pub mod trace_id;
pub mod user;
mod user_accounts;

pub use self::ai_product::{
    AiProduct, AiProductChanges, AiProductId, AiProductValidationError, ProductName,
};
pub use self::auth::{
    CredentialsValidationError, LoginCredentials, PasswordHash, Registration, VerifiedUser,
};
pub use self::error::{Error, ErrorCode};
pub use self::record::{Record, RecordChanges, RecordIdError, RecordStatus};
pub use self::record_service::RecordService;
pub use self::reporting::{ReportingService, UserStatistics};
pub use self::session::{
    Identity, SessionBinding, SessionManager, SessionToken, require_authenticated,
};
pub use self::site_settings::{
    SettingText, SettingsField, SiteSettings, SiteSettingsChanges, SiteSettingsId,
    SiteSettingsValidationError,
};
pub use self::site_settings_service::SiteSettingsService;
pub use self::trace_id::TraceId;
pub use self::user::{EmailAddress, User, UserChanges, UserId, UserName, UserValidationError};
pub use self::user_accounts::{EMAIL_TAKEN_MESSAGE, INVALID_CREDENTIALS_MESSAGE, UserAccountService};

/// Service for the AI product catalogue, which only supports list, get and
/// update.
pub type AiProductService = RecordService<AiProduct, dyn ports::RecordRepository<AiProduct>>;

/// HTTP header name used to propagate trace identifiers.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Convenient result alias for domain operations.
///
/// # Examples
/// ```
/// use admin_backend::domain::{DomainResult, Error};
///
/// fn lookup() -> DomainResult<u32> {
///     Err(Error::not_found("nothing here"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type DomainResult<T> = Result<T, Error>;
