//! User identity record
//!
//! The identity is owned by an external authentication collaborator; the
//! ledger only stores and returns it.

use serde::{Deserialize, Serialize};

use super::ids::UserId;
use super::preferences::Preferences;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Preferences>,
}

impl User {
    pub fn new(id: impl Into<UserId>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            avatar_url: None,
            preferences: None,
        }
    }

    pub fn with_avatar(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = Some(avatar_url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_omitted() {
        let user = User::new("u1", "Ana", "ana@example.com");
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["email"], "ana@example.com");
        assert!(value.get("avatarUrl").is_none());

        let user = user.with_avatar("https://example.com/a.png");
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["avatarUrl"], "https://example.com/a.png");
    }
}
