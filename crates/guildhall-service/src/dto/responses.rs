//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. Status
//! projections also implement `Deserialize` so they can round-trip through
//! the in-process cache.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use guildhall_core::entities::{DiscordMember, GuildSyncState};
use guildhall_discord::avatar_url;

/// Avatar size requested for directory listings
const LISTING_AVATAR_SIZE: u16 = 128;

// ============================================================================
// Common Response Types
// ============================================================================

/// Paginated response with skip/take pagination
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, total: i64, skip: i64, take: i64) -> Self {
        Self {
            data,
            pagination: PaginationMeta { total, skip, take },
        }
    }
}

/// Pagination metadata
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    /// Total rows matching the guild (unfiltered)
    pub total: i64,
    pub skip: i64,
    pub take: i64,
}

// ============================================================================
// Sync Responses
// ============================================================================

/// Summary result of one guild sync run.
///
/// `success` reflects whether any batch reported an error; a sync can reach
/// completed status while still carrying partial-batch errors here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    pub success: bool,
    pub total_members: usize,
    pub synced_members: usize,
    pub linked_members: usize,
    pub errors: Vec<String>,
}

impl SyncReport {
    /// Report for a sync aborted by an infrastructure failure
    #[must_use]
    pub fn failed(message: String) -> Self {
        Self {
            success: false,
            total_members: 0,
            synced_members: 0,
            linked_members: 0,
            errors: vec![message],
        }
    }
}

/// Sync state projection with the live mirror row count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncStatusResponse {
    pub guild_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guild_name: Option<String>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_synced_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_members: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synced_members: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
    pub member_count: i64,
}

impl SyncStatusResponse {
    pub fn from_state(state: GuildSyncState, member_count: i64) -> Self {
        Self {
            guild_id: state.guild_id,
            guild_name: state.guild_name,
            status: state.status.as_str().to_string(),
            last_synced_at: state.last_synced_at,
            total_members: state.total_members,
            synced_members: state.synced_members,
            last_error: state.last_error,
            member_count,
        }
    }
}

// ============================================================================
// Member Responses
// ============================================================================

/// One mirrored guild member, as shown in the admin directory
#[derive(Debug, Clone, Serialize)]
pub struct DiscordMemberResponse {
    pub discord_id: String,
    pub guild_id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joined_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_user_id: Option<Uuid>,
    pub synced_at: DateTime<Utc>,
    pub sync_status: String,
}

impl From<DiscordMember> for DiscordMemberResponse {
    fn from(member: DiscordMember) -> Self {
        let avatar = avatar_url(
            &member.discord_id,
            member.avatar_hash.as_deref(),
            LISTING_AVATAR_SIZE,
        );
        Self {
            discord_id: member.discord_id,
            guild_id: member.guild_id,
            username: member.username,
            discriminator: member.discriminator,
            display_name: member.display_name,
            avatar_url: avatar,
            joined_at: member.joined_at,
            linked_user_id: member.linked_user_id,
            synced_at: member.synced_at,
            sync_status: member.sync_status,
        }
    }
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic liveness response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    #[must_use]
    pub fn healthy() -> Self {
        Self { status: "ok" }
    }
}

/// Readiness response with dependency health
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub database: bool,
}

impl ReadinessResponse {
    #[must_use]
    pub fn ready(database: bool) -> Self {
        Self {
            status: if database { "ready" } else { "degraded" },
            database,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_report() {
        let report = SyncReport::failed("api down".to_string());
        assert!(!report.success);
        assert_eq!(report.total_members, 0);
        assert_eq!(report.errors, vec!["api down".to_string()]);
    }

    #[test]
    fn test_member_response_derives_avatar_url() {
        let mut member = DiscordMember::new(
            "42".to_string(),
            "guild-1".to_string(),
            "tester".to_string(),
        );
        member.avatar_hash = Some("abc".to_string());

        let response = DiscordMemberResponse::from(member);
        assert_eq!(
            response.avatar_url.as_deref(),
            Some("https://cdn.discordapp.com/avatars/42/abc.png?size=128")
        );
    }

    #[test]
    fn test_readiness_status_string() {
        assert_eq!(ReadinessResponse::ready(true).status, "ready");
        assert_eq!(ReadinessResponse::ready(false).status, "degraded");
    }
}
