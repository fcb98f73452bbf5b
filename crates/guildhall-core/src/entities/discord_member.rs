//! Discord member entity - the local mirror of one external guild member
//!
//! One row per (discord_id, guild_id) pair. Rows are created the first time
//! a sync sees a member and updated on every later sighting; they are never
//! deleted by the sync itself.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Sync status recorded on every successful upsert
pub const SYNC_STATUS_ACTIVE: &str = "active";

/// Local mirror of an external guild member's profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscordMember {
    pub discord_id: String,
    pub guild_id: String,
    pub username: String,
    pub discriminator: Option<String>,
    pub display_name: Option<String>,
    pub avatar_hash: Option<String>,
    pub joined_at: Option<DateTime<Utc>>,
    /// Weak reference to a local user; the user may be deleted or merged
    /// independently of this row.
    pub linked_user_id: Option<Uuid>,
    pub synced_at: DateTime<Utc>,
    pub sync_status: String,
}

impl DiscordMember {
    /// Create a new mirror row for a freshly-seen member
    pub fn new(discord_id: String, guild_id: String, username: String) -> Self {
        Self {
            discord_id,
            guild_id,
            username,
            discriminator: None,
            display_name: None,
            avatar_hash: None,
            joined_at: None,
            linked_user_id: None,
            synced_at: Utc::now(),
            sync_status: SYNC_STATUS_ACTIVE.to_string(),
        }
    }

    /// Get the name to show in listings (display name if set, else username)
    pub fn shown_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }

    /// Check whether a local user is attached
    #[inline]
    pub fn is_linked(&self) -> bool {
        self.linked_user_id.is_some()
    }

    /// Attach a local user
    pub fn link(&mut self, user_id: Uuid) {
        self.linked_user_id = Some(user_id);
    }

    /// Detach the local user
    pub fn unlink(&mut self) {
        self.linked_user_id = None;
    }

    /// Stamp a successful sync
    pub fn touch_synced(&mut self) {
        self.synced_at = Utc::now();
        self.sync_status = SYNC_STATUS_ACTIVE.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member() -> DiscordMember {
        DiscordMember::new(
            "111".to_string(),
            "guild-1".to_string(),
            "tester".to_string(),
        )
    }

    #[test]
    fn test_member_creation() {
        let m = member();
        assert_eq!(m.discord_id, "111");
        assert_eq!(m.guild_id, "guild-1");
        assert!(!m.is_linked());
        assert_eq!(m.sync_status, SYNC_STATUS_ACTIVE);
    }

    #[test]
    fn test_shown_name_falls_back_to_username() {
        let mut m = member();
        assert_eq!(m.shown_name(), "tester");

        m.display_name = Some("Tester Prime".to_string());
        assert_eq!(m.shown_name(), "Tester Prime");
    }

    #[test]
    fn test_link_unlink() {
        let mut m = member();
        let user_id = Uuid::new_v4();

        m.link(user_id);
        assert_eq!(m.linked_user_id, Some(user_id));

        m.unlink();
        assert!(!m.is_linked());
    }
}
