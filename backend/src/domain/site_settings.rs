//! Singleton site configuration record.

use std::fmt;

use super::record::{Record, RecordChanges, TextError, bounded_text, define_record_id};
use super::user::{EmailAddress, UserValidationError};

/// Maximum length of the site name.
pub const SITE_NAME_MAX: usize = 100;
/// Maximum length of the WhatsApp number.
pub const WHATSAPP_NUMBER_MAX: usize = 20;
/// Maximum length of the currency label.
pub const CURRENCY_MAX: usize = 20;

define_record_id!(
    /// Identifier of the settings row.
    SiteSettingsId,
    "site settings"
);

/// Settings fields, used to name the offending field in validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    SiteName,
    ContactEmail,
    WhatsappNumber,
    Currency,
}

impl SettingsField {
    /// Form field name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SiteName => "site_name",
            Self::ContactEmail => "contact_email",
            Self::WhatsappNumber => "whatsapp_number",
            Self::Currency => "currency",
        }
    }
}

/// Validation errors for settings values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteSettingsValidationError {
    Empty { field: SettingsField },
    TooLong { field: SettingsField, max: usize },
    InvalidEmail,
    /// The first save must supply every field.
    Missing { field: SettingsField },
}

impl SiteSettingsValidationError {
    /// Field the error refers to.
    pub fn field(&self) -> SettingsField {
        match self {
            Self::Empty { field } | Self::TooLong { field, .. } | Self::Missing { field } => *field,
            Self::InvalidEmail => SettingsField::ContactEmail,
        }
    }
}

impl fmt::Display for SiteSettingsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} must not be empty", field.as_str()),
            Self::TooLong { field, max } => {
                write!(f, "{} must be at most {max} characters", field.as_str())
            }
            Self::InvalidEmail => write!(f, "contact_email must look like name@domain"),
            Self::Missing { field } => write!(
                f,
                "{} is required before site settings are first saved",
                field.as_str()
            ),
        }
    }
}

impl std::error::Error for SiteSettingsValidationError {}

/// Non-empty, length-bounded settings value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingText(String);

impl SettingText {
    /// Validate a value for the given field.
    pub fn new(
        field: SettingsField,
        raw: impl AsRef<str>,
        max: usize,
    ) -> Result<Self, SiteSettingsValidationError> {
        bounded_text(raw.as_ref(), max)
            .map(Self)
            .map_err(|err| match err {
                TextError::Empty => SiteSettingsValidationError::Empty { field },
                TextError::TooLong { max } => SiteSettingsValidationError::TooLong { field, max },
            })
    }
}

impl AsRef<str> for SettingText {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Validate a contact email for the settings form.
pub fn contact_email(raw: &str) -> Result<EmailAddress, SiteSettingsValidationError> {
    EmailAddress::new(raw).map_err(|err| match err {
        UserValidationError::EmptyEmail => SiteSettingsValidationError::Empty {
            field: SettingsField::ContactEmail,
        },
        UserValidationError::EmailTooLong { max } => SiteSettingsValidationError::TooLong {
            field: SettingsField::ContactEmail,
            max,
        },
        _ => SiteSettingsValidationError::InvalidEmail,
    })
}

/// Global site configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSettings {
    id: SiteSettingsId,
    site_name: SettingText,
    contact_email: EmailAddress,
    whatsapp_number: SettingText,
    currency: SettingText,
}

impl SiteSettings {
    pub fn new(
        id: SiteSettingsId,
        site_name: SettingText,
        contact_email: EmailAddress,
        whatsapp_number: SettingText,
        currency: SettingText,
    ) -> Self {
        Self {
            id,
            site_name,
            contact_email,
            whatsapp_number,
            currency,
        }
    }

    /// Build the first settings row, which needs every field.
    pub fn from_changes(changes: SiteSettingsChanges) -> Result<Self, SiteSettingsValidationError> {
        let missing = |field| SiteSettingsValidationError::Missing { field };
        Ok(Self::new(
            SiteSettingsId::random(),
            changes.site_name.ok_or(missing(SettingsField::SiteName))?,
            changes
                .contact_email
                .ok_or(missing(SettingsField::ContactEmail))?,
            changes
                .whatsapp_number
                .ok_or(missing(SettingsField::WhatsappNumber))?,
            changes.currency.ok_or(missing(SettingsField::Currency))?,
        ))
    }

    pub fn id(&self) -> &SiteSettingsId {
        &self.id
    }

    pub fn site_name(&self) -> &SettingText {
        &self.site_name
    }

    pub fn contact_email(&self) -> &EmailAddress {
        &self.contact_email
    }

    pub fn whatsapp_number(&self) -> &SettingText {
        &self.whatsapp_number
    }

    pub fn currency(&self) -> &SettingText {
        &self.currency
    }
}

/// Supplied settings fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteSettingsChanges {
    pub site_name: Option<SettingText>,
    pub contact_email: Option<EmailAddress>,
    pub whatsapp_number: Option<SettingText>,
    pub currency: Option<SettingText>,
}

impl RecordChanges for SiteSettingsChanges {
    fn is_empty(&self) -> bool {
        self.site_name.is_none()
            && self.contact_email.is_none()
            && self.whatsapp_number.is_none()
            && self.currency.is_none()
    }
}

impl Record for SiteSettings {
    type Id = SiteSettingsId;
    type Changes = SiteSettingsChanges;

    const KIND: &'static str = "site settings";

    fn id(&self) -> &SiteSettingsId {
        &self.id
    }

    fn apply(&mut self, changes: &SiteSettingsChanges) {
        if let Some(value) = &changes.site_name {
            self.site_name = value.clone();
        }
        if let Some(value) = &changes.contact_email {
            self.contact_email = value.clone();
        }
        if let Some(value) = &changes.whatsapp_number {
            self.whatsapp_number = value.clone();
        }
        if let Some(value) = &changes.currency {
            self.currency = value.clone();
        }
    }
}
