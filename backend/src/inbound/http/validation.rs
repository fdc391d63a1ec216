//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every form failure becomes `400 Bad Request` with
//! `details: { field, code }` so the page can highlight the offending input.

use std::str::FromStr;

use serde_json::json;

use crate::domain::record::RecordStatusParseError;
use crate::domain::{
    AiProductValidationError, CredentialsValidationError, Error, Record, RecordStatus,
    SiteSettingsValidationError, UserValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    Empty,
    TooLong,
    InvalidEmail,
    InvalidStatus,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::Empty => "empty",
            ErrorCode::TooLong => "too_long",
            ErrorCode::InvalidEmail => "invalid_email",
            ErrorCode::InvalidStatus => "invalid_status",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

pub(crate) const NAME: FieldName = FieldName::new("name");
pub(crate) const EMAIL: FieldName = FieldName::new("email");
pub(crate) const PASSWORD: FieldName = FieldName::new("password");
pub(crate) const STATUS: FieldName = FieldName::new("status");

fn field_error(field: FieldName, code: ErrorCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        ErrorCode::MissingField,
        format!("missing required field: {name}"),
    )
}

/// Unwrap a mandatory form value.
pub(crate) fn required(field: FieldName, value: Option<String>) -> Result<String, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Parse a record id from the path. Ids that do not parse match no record.
pub(crate) fn path_id<R>(raw: &str) -> Result<R::Id, Error>
where
    R: Record,
    R::Id: FromStr,
{
    raw.parse::<R::Id>()
        .map_err(|_| Error::not_found(format!("{} {raw} not found", R::KIND)))
}

/// Parse an optional status field; absent stays absent.
pub(crate) fn optional_status(value: Option<&str>) -> Result<Option<RecordStatus>, Error> {
    value
        .map(|raw| {
            raw.parse::<RecordStatus>()
                .map_err(|err: RecordStatusParseError| {
                    field_error(STATUS, ErrorCode::InvalidStatus, err.to_string())
                })
        })
        .transpose()
}

pub(crate) fn user_error(err: UserValidationError) -> Error {
    let message = err.to_string();
    match err {
        UserValidationError::EmptyName => field_error(NAME, ErrorCode::Empty, message),
        UserValidationError::NameTooLong { .. } => field_error(NAME, ErrorCode::TooLong, message),
        UserValidationError::EmptyEmail => field_error(EMAIL, ErrorCode::Empty, message),
        UserValidationError::EmailTooLong { .. } => {
            field_error(EMAIL, ErrorCode::TooLong, message)
        }
        UserValidationError::InvalidEmail => field_error(EMAIL, ErrorCode::InvalidEmail, message),
    }
}

pub(crate) fn credentials_error(err: CredentialsValidationError) -> Error {
    match err {
        CredentialsValidationError::User(inner) => user_error(inner),
        CredentialsValidationError::EmptyPassword => {
            field_error(PASSWORD, ErrorCode::Empty, err.to_string())
        }
    }
}

pub(crate) fn ai_product_error(err: AiProductValidationError) -> Error {
    let message = err.to_string();
    match err {
        AiProductValidationError::EmptyName => field_error(NAME, ErrorCode::Empty, message),
        AiProductValidationError::NameTooLong { .. } => {
            field_error(NAME, ErrorCode::TooLong, message)
        }
    }
}

pub(crate) fn site_settings_error(err: SiteSettingsValidationError) -> Error {
    let field = FieldName::new(err.field().as_str());
    let code = match err {
        SiteSettingsValidationError::Empty { .. } => ErrorCode::Empty,
        SiteSettingsValidationError::TooLong { .. } => ErrorCode::TooLong,
        SiteSettingsValidationError::InvalidEmail => ErrorCode::InvalidEmail,
        SiteSettingsValidationError::Missing { .. } => ErrorCode::MissingField,
    };
    field_error(field, code, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SettingsField, user::USER_NAME_MAX};
    use rstest::rstest;

    fn details(error: &Error) -> serde_json::Value {
        error.details().cloned().expect("details present")
    }

    #[test]
    fn missing_field_names_the_field() {
        let err = required(EMAIL, None).expect_err("missing");
        assert_eq!(err.message(), "missing required field: email");
        assert_eq!(
            details(&err),
            json!({"field": "email", "code": "missing_field"})
        );
    }

    #[rstest]
    #[case(UserValidationError::EmptyName, "name", "empty")]
    #[case(UserValidationError::NameTooLong { max: USER_NAME_MAX }, "name", "too_long")]
    #[case(UserValidationError::InvalidEmail, "email", "invalid_email")]
    fn user_errors_map_to_fields(
        #[case] err: UserValidationError,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let mapped = user_error(err);
        assert_eq!(details(&mapped), json!({"field": field, "code": code}));
    }

    #[test]
    fn blank_password_maps_to_password_field() {
        let mapped = credentials_error(CredentialsValidationError::EmptyPassword);
        assert_eq!(
            details(&mapped),
            json!({"field": "password", "code": "empty"})
        );
    }

    #[test]
    fn settings_errors_use_form_field_names() {
        let mapped = site_settings_error(SiteSettingsValidationError::Missing {
            field: SettingsField::WhatsappNumber,
        });
        assert_eq!(
            details(&mapped),
            json!({"field": "whatsapp_number", "code": "missing_field"})
        );
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some("inactive"), Some(RecordStatus::Inactive))]
    fn parses_optional_status(
        #[case] raw: Option<&str>,
        #[case] expected: Option<RecordStatus>,
    ) {
        assert_eq!(optional_status(raw).expect("valid"), expected);
    }

    #[test]
    fn unparsable_path_id_is_not_found() {
        let err = path_id::<crate::domain::User>("42").expect_err("not a uuid");
        assert_eq!(err.code(), crate::domain::ErrorCode::NotFound);
        assert_eq!(err.message(), "user 42 not found");
    }

    #[test]
    fn rejects_unknown_status() {
        let err = optional_status(Some("Suspended")).expect_err("invalid");
        assert_eq!(
            details(&err),
            json!({"field": "status", "code": "invalid_status"})
        );
    }
}
