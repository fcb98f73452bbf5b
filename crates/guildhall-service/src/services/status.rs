//! Sync status tracking
//!
//! Single source of truth for "what is the current state of syncing guild G".
//! Writes go straight to the sync state table; reads are served through the
//! in-process cache and invalidated on every status change.

use std::time::Duration;

use tracing::{info, instrument};

use guildhall_core::entities::{GuildSyncState, SyncStatus};

use crate::dto::SyncStatusResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Cache key prefix for status projections
const STATUS_CACHE_PREFIX: &str = "sync:status:";

/// TTL for cached status projections
const STATUS_CACHE_TTL: Duration = Duration::from_secs(15);

/// Optional payload stored alongside a status change
#[derive(Debug, Clone, Default)]
pub struct SyncStatusData {
    pub guild_name: Option<String>,
    pub total_members: Option<i32>,
    pub synced_members: Option<i32>,
}

/// Sync status tracker
pub struct SyncStatusService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SyncStatusService<'a> {
    /// Create a new SyncStatusService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn cache_key(guild_id: &str) -> String {
        format!("{STATUS_CACHE_PREFIX}{guild_id}")
    }

    /// Record a status change for a guild, creating the state row on first
    /// contact.
    ///
    /// - `Syncing` leaves `last_synced_at` untouched.
    /// - `Completed` stamps `last_synced_at`, stores the provided
    ///   name/counts, and clears `last_error`.
    /// - `Error` records `last_error` and preserves `last_synced_at`.
    #[instrument(skip(self, data, error))]
    pub async fn set_status(
        &self,
        guild_id: &str,
        status: SyncStatus,
        data: Option<SyncStatusData>,
        error: Option<String>,
    ) -> ServiceResult<GuildSyncState> {
        let mut state = self
            .ctx
            .sync_state_repo()
            .find(guild_id)
            .await?
            .unwrap_or_else(|| GuildSyncState::new(guild_id.to_string()));

        match status {
            SyncStatus::Pending => {}
            SyncStatus::Syncing => state.begin_sync(),
            SyncStatus::Completed => {
                let data = data.unwrap_or_default();
                state.complete(data.guild_name, data.total_members, data.synced_members);
            }
            SyncStatus::Error => {
                state.fail(error.unwrap_or_else(|| "unknown error".to_string()));
            }
        }

        self.ctx.sync_state_repo().upsert(&state).await?;
        self.ctx.cache().invalidate_by_prefix(&Self::cache_key(guild_id));

        info!(guild_id = %guild_id, status = %state.status, "Recorded sync status");

        Ok(state)
    }

    /// Read the current status of a guild plus its mirror row count
    #[instrument(skip(self))]
    pub async fn get_status(&self, guild_id: &str) -> ServiceResult<SyncStatusResponse> {
        let key = Self::cache_key(guild_id);
        if let Some(cached) = self.ctx.cache().get::<SyncStatusResponse>(&key) {
            return Ok(cached);
        }

        let state = self
            .ctx
            .sync_state_repo()
            .find(guild_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Sync state", guild_id))?;

        let member_count = self.ctx.member_repo().count_by_guild(guild_id).await?;
        let response = SyncStatusResponse::from_state(state, member_count);

        if let Err(e) = self
            .ctx
            .cache()
            .set(&key, &response, Some(STATUS_CACHE_TTL))
        {
            tracing::debug!(error = %e, "Failed to cache sync status");
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::TestHarness;

    #[tokio::test]
    async fn test_set_status_creates_state_on_first_contact() {
        let harness = TestHarness::new();
        let service = SyncStatusService::new(harness.ctx());

        let state = service
            .set_status("g1", SyncStatus::Syncing, None, None)
            .await
            .unwrap();

        assert_eq!(state.status, SyncStatus::Syncing);
        assert!(state.last_synced_at.is_none());
    }

    #[tokio::test]
    async fn test_completed_stores_counts_and_clears_error() {
        let harness = TestHarness::new();
        let service = SyncStatusService::new(harness.ctx());

        service
            .set_status("g1", SyncStatus::Error, None, Some("boom".to_string()))
            .await
            .unwrap();

        let data = SyncStatusData {
            guild_name: Some("Guild One".to_string()),
            total_members: Some(12),
            synced_members: Some(11),
        };
        let state = service
            .set_status("g1", SyncStatus::Completed, Some(data), None)
            .await
            .unwrap();

        assert_eq!(state.status, SyncStatus::Completed);
        assert_eq!(state.guild_name.as_deref(), Some("Guild One"));
        assert_eq!(state.total_members, Some(12));
        assert!(state.last_error.is_none());
        assert!(state.last_synced_at.is_some());
    }

    #[tokio::test]
    async fn test_error_preserves_last_synced_at() {
        let harness = TestHarness::new();
        let service = SyncStatusService::new(harness.ctx());

        service
            .set_status("g1", SyncStatus::Completed, None, None)
            .await
            .unwrap();
        let completed = service.get_status("g1").await.unwrap();

        let state = service
            .set_status("g1", SyncStatus::Error, None, Some("down".to_string()))
            .await
            .unwrap();

        assert_eq!(state.last_synced_at, completed.last_synced_at);
        assert_eq!(state.last_error.as_deref(), Some("down"));
    }

    #[tokio::test]
    async fn test_get_status_unknown_guild_is_not_found() {
        let harness = TestHarness::new();
        let service = SyncStatusService::new(harness.ctx());

        let err = service.get_status("missing").await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_status_cache_invalidated_on_change() {
        let harness = TestHarness::new();
        let service = SyncStatusService::new(harness.ctx());

        service
            .set_status("g1", SyncStatus::Syncing, None, None)
            .await
            .unwrap();
        let first = service.get_status("g1").await.unwrap();
        assert_eq!(first.status, "syncing");

        service
            .set_status("g1", SyncStatus::Completed, None, None)
            .await
            .unwrap();
        let second = service.get_status("g1").await.unwrap();
        assert_eq!(second.status, "completed");
    }
}
