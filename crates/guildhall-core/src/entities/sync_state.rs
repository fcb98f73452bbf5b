//! Guild sync state entity - per-guild sync lifecycle record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a guild sync
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    #[default]
    Pending,
    Syncing,
    Completed,
    Error,
}

impl SyncStatus {
    /// Stable string form used in the database and API responses
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Syncing => "syncing",
            Self::Completed => "completed",
            Self::Error => "error",
        }
    }

    /// Parse from the stored string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "syncing" => Some(Self::Syncing),
            "completed" => Some(Self::Completed),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

impl std::fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-guild sync state
///
/// Created pending on the first sync attempt for a guild and mutated at sync
/// start and sync end. Never deleted by the sync subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildSyncState {
    pub guild_id: String,
    pub guild_name: Option<String>,
    pub status: SyncStatus,
    pub last_synced_at: Option<DateTime<Utc>>,
    pub total_members: Option<i32>,
    pub synced_members: Option<i32>,
    pub last_error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GuildSyncState {
    /// Create a fresh pending state for a guild
    pub fn new(guild_id: String) -> Self {
        let now = Utc::now();
        Self {
            guild_id,
            guild_name: None,
            status: SyncStatus::Pending,
            last_synced_at: None,
            total_members: None,
            synced_members: None,
            last_error: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark the sync as running. Leaves `last_synced_at` untouched.
    pub fn begin_sync(&mut self) {
        self.status = SyncStatus::Syncing;
        self.updated_at = Utc::now();
    }

    /// Mark the sync as completed, stamping `last_synced_at` and clearing
    /// any previous error.
    pub fn complete(
        &mut self,
        guild_name: Option<String>,
        total_members: Option<i32>,
        synced_members: Option<i32>,
    ) {
        let now = Utc::now();
        self.status = SyncStatus::Completed;
        self.last_synced_at = Some(now);
        if guild_name.is_some() {
            self.guild_name = guild_name;
        }
        if total_members.is_some() {
            self.total_members = total_members;
        }
        if synced_members.is_some() {
            self.synced_members = synced_members;
        }
        self.last_error = None;
        self.updated_at = now;
    }

    /// Mark the sync as failed. `last_synced_at` keeps the time of the last
    /// successful sync so staleness stays detectable across failures.
    pub fn fail(&mut self, message: String) {
        self.status = SyncStatus::Error;
        self.last_error = Some(message);
        self.updated_at = Utc::now();
    }
}
