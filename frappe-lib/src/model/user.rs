//! Logged in user

use serde::Deserialize;
use serde::Serialize;

/// The user a session or API key belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    /// User id, usually the email address.
    pub name: String,
    /// Display name, if known.
    pub full_name: Option<String>,
    /// Email, if known.
    pub email: Option<String>,
}

impl UserInfo {
    /// Creates a user with only an id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            full_name: None,
            email: None,
        }
    }

    /// The name to show in a UI: full name when set, otherwise the id.
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.name)
    }
}
