//! User model for storage and API.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role assigned to a user at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Administrator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Administrator => "administrator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Role::Customer),
            "administrator" => Ok(Role::Administrator),
            _ => Err(AppError::Validation("Invalid role specified".to_string())),
        }
    }
}

/// A suggested action shown to the user (e.g. "Clean Now").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    pub label: String,
    pub action_url: String,
}

/// User profile stored in Firestore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique username (also used as document ID)
    pub username: String,
    pub role: Role,
    /// Suggested actions, in display order
    #[serde(default)]
    pub action_plan: Vec<ActionItem>,
}

/// Body of `POST /users`.
///
/// Fields are optional so that a missing value is reported as a validation
/// error rather than a deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub role: Option<String>,
}

impl CreateUserRequest {
    /// Validate the request and build a new user with an empty action plan.
    ///
    /// The role is checked before the username.
    pub fn into_user(self) -> Result<User, AppError> {
        let role: Role = self.role.as_deref().unwrap_or_default().parse()?;

        let username = self
            .username
            .filter(|name| !name.is_empty())
            .ok_or_else(|| AppError::DocumentValidation("username is required".to_string()))?;

        Ok(User {
            username,
            role,
            action_plan: Vec::new(),
        })
    }
}
