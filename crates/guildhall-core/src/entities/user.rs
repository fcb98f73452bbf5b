//! User entity - a member of the platform
//!
//! A user is either a real authenticated account or a placeholder created by
//! the Discord roster sync for members who have never signed in.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub placeholder: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new authenticated user
    pub fn new(name: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email: Some(email),
            avatar_url: None,
            placeholder: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a placeholder user carrying only a name and avatar.
    ///
    /// Placeholders stand in for external directory members until a real
    /// account links the same identity, at which point they are merged away.
    pub fn placeholder(name: String, avatar_url: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email: None,
            avatar_url,
            placeholder: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if this user is a sync-provisioned placeholder
    #[inline]
    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    /// Update the display name
    pub fn set_name(&mut self, name: String) {
        self.name = name;
        self.updated_at = Utc::now();
    }

    /// Update the avatar URL
    pub fn set_avatar_url(&mut self, avatar_url: Option<String>) {
        self.avatar_url = avatar_url;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_is_not_placeholder() {
        let user = User::new("Ada".to_string(), "ada@example.com".to_string());
        assert!(!user.is_placeholder());
        assert_eq!(user.email.as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn test_placeholder_has_no_email() {
        let user = User::placeholder("Ghost".to_string(), None);
        assert!(user.is_placeholder());
        assert!(user.email.is_none());
        assert!(user.avatar_url.is_none());
    }

    #[test]
    fn test_placeholder_keeps_avatar() {
        let user = User::placeholder(
            "Ghost".to_string(),
            Some("https://cdn.example.com/a.png".to_string()),
        );
        assert_eq!(
            user.avatar_url.as_deref(),
            Some("https://cdn.example.com/a.png")
        );
    }

    #[test]
    fn test_set_name() {
        let mut user = User::new("Ada".to_string(), "ada@example.com".to_string());
        user.set_name("Ada L.".to_string());
        assert_eq!(user.name, "Ada L.");
    }
}
