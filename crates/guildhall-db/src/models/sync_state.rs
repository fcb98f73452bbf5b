//! Guild sync state database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for guild_sync_states table
#[derive(Debug, Clone, FromRow)]
pub struct GuildSyncStateModel {
    pub guild_id: String,
    pub guild_name: Option<String>,
    pub status: String,
    pub last_synced_at: Option<DateTime<Utc>>,
    pub total_members: Option<i32>,
    pub synced_members: Option<i32>,
    pub last_error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
