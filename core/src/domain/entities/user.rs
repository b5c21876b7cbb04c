//! Signed-in user held in local session storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display name given to users who signed in with a phone number only
pub const DEFAULT_DISPLAY_NAME: &str = "User";

/// The locally signed-in user
///
/// Stored as camelCase JSON so the stored shape matches what the browser
/// build kept in local storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Display name
    pub name: String,

    /// Email address, when signed in with email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Normalised phone number, when signed in with a phone code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    /// Whether this user completed sign-in
    #[serde(default)]
    pub is_authenticated: bool,

    /// When the session started
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signed_in_at: Option<DateTime<Utc>>,
}

impl User {
    /// A user identified by a verified phone number
    pub fn from_phone(phone_number: impl Into<String>) -> Self {
        Self {
            name: DEFAULT_DISPLAY_NAME.to_string(),
            email: None,
            phone_number: Some(phone_number.into()),
            is_authenticated: false,
            signed_in_at: None,
        }
    }

    /// A user identified by an email address
    pub fn from_email(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: Some(email.into()),
            phone_number: None,
            is_authenticated: false,
            signed_in_at: None,
        }
    }

    /// Sign-in needs at least one non-empty identifier
    pub fn has_identifier(&self) -> bool {
        let present = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.trim().is_empty());
        present(&self.email) || present(&self.phone_number)
    }

    /// Marks the user as signed in at `now`
    pub fn authenticate(mut self, now: DateTime<Utc>) -> Self {
        self.is_authenticated = true;
        self.signed_in_at = Some(now);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_phone() {
        let user = User::from_phone("+14155552671");
        assert_eq!(user.name, "User");
        assert_eq!(user.phone_number.as_deref(), Some("+14155552671"));
        assert!(!user.is_authenticated);
        assert!(user.has_identifier());
    }

    #[test]
    fn test_identifier_required() {
        let mut user = User::from_email("Ada", "ada@example.com");
        assert!(user.has_identifier());

        user.email = Some("  ".to_string());
        assert!(!user.has_identifier());
    }

    #[test]
    fn test_stored_shape_is_camel_case() {
        let user = User::from_phone("+14155552671").authenticate(Utc::now());
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["phoneNumber"], "+14155552671");
        assert_eq!(json["isAuthenticated"], true);
        assert!(json.get("email").is_none());
    }

    #[test]
    fn test_parses_browser_record() {
        let stored = r#"{"name":"User","phoneNumber":"+447700900123","isAuthenticated":true}"#;
        let user: User = serde_json::from_str(stored).unwrap();
        assert!(user.is_authenticated);
        assert!(user.signed_in_at.is_none());
    }
}
