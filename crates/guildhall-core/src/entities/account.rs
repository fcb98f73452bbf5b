//! Linked account entity - an OAuth identity attached to a user

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Provider key for Discord OAuth accounts
pub const DISCORD_PROVIDER: &str = "discord";

/// An external identity provider account linked to a local user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedAccount {
    pub id: Uuid,
    pub user_id: Uuid,
    pub provider: String,
    pub provider_account_id: String,
    pub created_at: DateTime<Utc>,
}

impl LinkedAccount {
    /// Create a new account link
    pub fn new(user_id: Uuid, provider: String, provider_account_id: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            provider,
            provider_account_id,
            created_at: Utc::now(),
        }
    }

    /// Check if this link belongs to the Discord provider
    #[inline]
    pub fn is_discord(&self) -> bool {
        self.provider == DISCORD_PROVIDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_creation() {
        let user_id = Uuid::new_v4();
        let account = LinkedAccount::new(
            user_id,
            DISCORD_PROVIDER.to_string(),
            "123456789012345678".to_string(),
        );
        assert_eq!(account.user_id, user_id);
        assert!(account.is_discord());
    }

    #[test]
    fn test_non_discord_provider() {
        let account = LinkedAccount::new(Uuid::new_v4(), "github".to_string(), "42".to_string());
        assert!(!account.is_discord());
    }
}
