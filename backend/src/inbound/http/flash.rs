//! One-shot notices queued in the session and shown on the next page.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Visual weight of a flash notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FlashCategory {
    Success,
    Info,
    Danger,
}

/// A message queued by one request and rendered by the next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Flash {
    pub category: FlashCategory,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Info,
            message: message.into(),
        }
    }

    /// Notice for a failed action the visitor can retry.
    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Danger,
            message: message.into(),
        }
    }
}

pub const ACCOUNT_CREATED: &str = "Your account has been created!";
pub const LOGGED_OUT: &str = "You have been logged out.";
pub const LOGIN_REQUIRED: &str = "Please log in to access this page.";
pub const USER_UPDATED: &str = "User updated.";
pub const USER_DELETED: &str = "User deleted.";
pub const AI_PRODUCT_UPDATED: &str = "AI product updated.";
pub const SETTINGS_UPDATED: &str = "Settings updated successfully!";
