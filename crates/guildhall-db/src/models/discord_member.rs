//! Discord member database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for discord_members table
#[derive(Debug, Clone, FromRow)]
pub struct DiscordMemberModel {
    pub discord_id: String,
    pub guild_id: String,
    pub username: String,
    pub discriminator: Option<String>,
    pub display_name: Option<String>,
    pub avatar_hash: Option<String>,
    pub joined_at: Option<DateTime<Utc>>,
    pub linked_user_id: Option<Uuid>,
    pub synced_at: DateTime<Utc>,
    pub sync_status: String,
}
