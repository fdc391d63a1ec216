//! AI product catalogue entries.
//!
//! Products are created out of band (seeding or SQL); the admin panel only
//! lists and edits them.

use std::fmt;

use super::record::{Record, RecordChanges, RecordStatus, TextError, bounded_text, define_record_id};

/// Maximum length of a product name.
pub const PRODUCT_NAME_MAX: usize = 100;

define_record_id!(
    /// Stable AI product identifier.
    AiProductId,
    "AI product"
);

/// Validation errors for product fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiProductValidationError {
    EmptyName,
    NameTooLong { max: usize },
}

impl fmt::Display for AiProductValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "product name must not be empty"),
            Self::NameTooLong { max } => {
                write!(f, "product name must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for AiProductValidationError {}

/// Product display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductName(String);

impl ProductName {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, AiProductValidationError> {
        bounded_text(raw.as_ref(), PRODUCT_NAME_MAX)
            .map(Self)
            .map_err(|err| match err {
                TextError::Empty => AiProductValidationError::EmptyName,
                TextError::TooLong { max } => AiProductValidationError::NameTooLong { max },
            })
    }
}

impl AsRef<str> for ProductName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Managed catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiProduct {
    id: AiProductId,
    name: ProductName,
    status: RecordStatus,
}

impl AiProduct {
    pub fn new(id: AiProductId, name: ProductName, status: RecordStatus) -> Self {
        Self { id, name, status }
    }

    pub fn id(&self) -> &AiProductId {
        &self.id
    }

    pub fn name(&self) -> &ProductName {
        &self.name
    }

    pub fn status(&self) -> RecordStatus {
        self.status
    }
}

/// Fields an admin may overwrite on a product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AiProductChanges {
    pub name: Option<ProductName>,
    pub status: Option<RecordStatus>,
}

impl RecordChanges for AiProductChanges {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.status.is_none()
    }
}

impl Record for AiProduct {
    type Id = AiProductId;
    type Changes = AiProductChanges;

    const KIND: &'static str = "AI product";

    fn id(&self) -> &AiProductId {
        &self.id
    }

    fn apply(&mut self, changes: &AiProductChanges) {
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
    }
}
