//! Shared vocabulary for records managed through the admin panel.
//!
//! Users, AI products and the site settings row are independent aggregates
//! that share one CRUD contract. [`Record`] ties each aggregate to its
//! identifier and partial-update type so a single service and repository
//! port can serve all of them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Maximum stored length for a status value.
pub const STATUS_MAX: usize = 20;

/// Lifecycle status shared by users and AI products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RecordStatus {
    /// Record is in use. New records start here.
    #[default]
    Active,
    /// Record is retained but switched off.
    Inactive,
}

impl RecordStatus {
    /// Canonical stored representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a status string is neither `Active` nor `Inactive`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("status must be one of Active or Inactive, got '{value}'")]
pub struct RecordStatusParseError {
    value: String,
}

impl FromStr for RecordStatus {
    type Err = RecordStatusParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("active") {
            Ok(Self::Active)
        } else if trimmed.eq_ignore_ascii_case("inactive") {
            Ok(Self::Inactive)
        } else {
            Err(RecordStatusParseError {
                value: value.to_owned(),
            })
        }
    }
}

/// Raised when a record identifier is not a UUID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} id must be a valid UUID")]
pub struct RecordIdError {
    kind: &'static str,
}

/// A set of optional field overwrites for one record type.
pub trait RecordChanges: Send + Sync {
    /// True when no field is supplied.
    fn is_empty(&self) -> bool;
}

/// Aggregate managed by the generic record service.
pub trait Record: Clone + Send + Sync + 'static {
    /// Opaque identifier type.
    type Id: Clone + fmt::Display + Send + Sync + 'static;
    /// Partial update applied by `update`.
    type Changes: RecordChanges + 'static;

    /// Human-readable name used in messages, e.g. `"user"`.
    const KIND: &'static str;

    /// Identifier of this record.
    fn id(&self) -> &Self::Id;

    /// Overwrite the supplied fields in place.
    fn apply(&mut self, changes: &Self::Changes);
}

/// Generate a UUID-backed identifier newtype for a record type.
macro_rules! define_record_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Parse an identifier from its textual form.
            pub fn new(raw: impl AsRef<str>) -> Result<Self, $crate::domain::RecordIdError> {
                uuid::Uuid::parse_str(raw.as_ref().trim())
                    .map(Self)
                    .map_err(|_| $crate::domain::record::record_id_error($kind))
            }

            /// Generate a fresh random identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Access the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::domain::RecordIdError;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                Self::new(raw)
            }
        }
    };
}

pub(crate) use define_record_id;

pub(crate) const fn record_id_error(kind: &'static str) -> RecordIdError {
    RecordIdError { kind }
}

/// Trim `value` and check it is non-empty and at most `max` characters.
pub(crate) fn bounded_text(value: &str, max: usize) -> Result<String, TextError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TextError::Empty);
    }
    if trimmed.chars().count() > max {
        return Err(TextError::TooLong { max });
    }
    Ok(trimmed.to_owned())
}

/// Outcome of [`bounded_text`] validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TextError {
    Empty,
    TooLong { max: usize },
}
