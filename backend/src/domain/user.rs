//! User account aggregate.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use super::auth::PasswordHash;
use super::record::{Record, RecordChanges, RecordStatus, TextError, bounded_text, define_record_id};

/// Maximum length of a user's name.
pub const USER_NAME_MAX: usize = 100;
/// Maximum length of an email address.
pub const EMAIL_MAX: usize = 100;

define_record_id!(
    /// Stable user identifier stored as a UUID.
    UserId,
    "user"
);

/// Validation errors raised by user value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyName,
    NameTooLong { max: usize },
    EmptyEmail,
    EmailTooLong { max: usize },
    InvalidEmail,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::NameTooLong { max } => write!(f, "name must be at most {max} characters"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmailTooLong { max } => write!(f, "email must be at most {max} characters"),
            Self::InvalidEmail => write!(f, "email must look like name@domain"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Display name of an account holder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    /// Trim and validate a name.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        bounded_text(raw.as_ref(), USER_NAME_MAX)
            .map(Self)
            .map_err(|err| match err {
                TextError::Empty => UserValidationError::EmptyName,
                TextError::TooLong { max } => UserValidationError::NameTooLong { max },
            })
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Length is enforced separately; this only checks the overall shape.
        let pattern = r"^[^@\s]+@[^@\s]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Email address used as the login key.
///
/// ## Invariants
/// - Trimmed, lowercased and shaped like `local@domain`, so uniqueness
///   checks are case-insensitive.
///
/// # Examples
/// ```
/// use admin_backend::domain::EmailAddress;
///
/// let email = EmailAddress::new("  Ann@X.com ").unwrap();
/// assert_eq!(email.as_ref(), "ann@x.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Normalise and validate an email address.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        // Lowercasing can lengthen some characters, so bound the final form.
        let lowered = raw.as_ref().to_lowercase();
        let value = bounded_text(&lowered, EMAIL_MAX).map_err(|err| match err {
            TextError::Empty => UserValidationError::EmptyEmail,
            TextError::TooLong { max } => UserValidationError::EmailTooLong { max },
        })?;
        if !email_regex().is_match(&value) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Registered account.
///
/// The password only ever exists here as a one-way [`PasswordHash`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: UserName,
    email: EmailAddress,
    password_hash: PasswordHash,
    status: RecordStatus,
}

impl User {
    /// Build a freshly registered, active user.
    pub fn register(name: UserName, email: EmailAddress, password_hash: PasswordHash) -> Self {
        Self::new(
            UserId::random(),
            name,
            email,
            password_hash,
            RecordStatus::Active,
        )
    }

    /// Rehydrate a user from stored fields.
    pub fn new(
        id: UserId,
        name: UserName,
        email: EmailAddress,
        password_hash: PasswordHash,
        status: RecordStatus,
    ) -> Self {
        Self {
            id,
            name,
            email,
            password_hash,
            status,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn status(&self) -> RecordStatus {
        self.status
    }
}

/// Fields an admin may overwrite on an existing user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub name: Option<UserName>,
    pub email: Option<EmailAddress>,
    pub status: Option<RecordStatus>,
}

impl RecordChanges for UserChanges {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.status.is_none()
    }
}

impl Record for User {
    type Id = UserId;
    type Changes = UserChanges;

    const KIND: &'static str = "user";

    fn id(&self) -> &UserId {
        &self.id
    }

    fn apply(&mut self, changes: &UserChanges) {
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(email) = &changes.email {
            self.email = email.clone();
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
    }
}
