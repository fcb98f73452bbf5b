//! Guild sync orchestration
//!
//! One sync run: mark the guild syncing, probe permissions, fetch the full
//! member list, upsert it in batches, then record the terminal status. The
//! caller always gets a [`SyncReport`] back; infrastructure failures are
//! folded into it rather than propagated.
//!
//! Two syncs of the same guild are not mutually excluded; concurrent runs
//! interleave their per-row upserts and the status row is last-writer-wins.

use thiserror::Error;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use guildhall_core::entities::{DiscordMember, SyncStatus, User, DISCORD_PROVIDER};
use guildhall_discord::{avatar_url, DiscordApiError, DiscordGuildMember};

use crate::dto::SyncReport;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::status::{SyncStatusData, SyncStatusService};

/// Fallback name for a member record carrying no usable name at all
const DEFAULT_MEMBER_NAME: &str = "Discord Member";

/// Avatar size stored on provisioned placeholder users
const PLACEHOLDER_AVATAR_SIZE: u16 = 256;

/// Infrastructure failure that aborts a whole sync run
#[derive(Debug, Error)]
enum SyncAbort {
    #[error("Missing required permissions: {0}")]
    MissingPermissions(String),

    #[error(transparent)]
    Api(#[from] DiscordApiError),
}

/// Counts produced by one batch
#[derive(Debug, Default, Clone, Copy)]
struct BatchOutcome {
    synced: usize,
    linked: usize,
}

/// Everything a successful run produces before the final status write
struct SyncOutcome {
    guild_name: String,
    total_members: usize,
    synced_members: usize,
    linked_members: usize,
    errors: Vec<String>,
}

/// Guild sync service
pub struct GuildSyncService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> GuildSyncService<'a> {
    /// Create a new GuildSyncService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Run a full sync for one guild.
    ///
    /// Always resolves to a report: batch-level errors are collected into
    /// `errors` without stopping the run, and an infrastructure failure
    /// (permission probe, guild or member fetch) is recorded as the sole
    /// error with the guild left in error status. Only failures writing the
    /// status row itself propagate as `Err`.
    #[instrument(skip(self))]
    pub async fn sync_guild(&self, guild_id: &str) -> ServiceResult<SyncReport> {
        let status = SyncStatusService::new(self.ctx);
        status
            .set_status(guild_id, SyncStatus::Syncing, None, None)
            .await?;

        match self.run_sync(guild_id).await {
            Ok(outcome) => {
                let data = SyncStatusData {
                    guild_name: Some(outcome.guild_name),
                    total_members: Some(outcome.total_members as i32),
                    synced_members: Some(outcome.synced_members as i32),
                };
                status
                    .set_status(guild_id, SyncStatus::Completed, Some(data), None)
                    .await?;

                info!(
                    guild_id = %guild_id,
                    total = outcome.total_members,
                    synced = outcome.synced_members,
                    linked = outcome.linked_members,
                    batch_errors = outcome.errors.len(),
                    "Guild sync completed"
                );

                Ok(SyncReport {
                    success: outcome.errors.is_empty(),
                    total_members: outcome.total_members,
                    synced_members: outcome.synced_members,
                    linked_members: outcome.linked_members,
                    errors: outcome.errors,
                })
            }
            Err(abort) => {
                let message = abort.to_string();
                warn!(guild_id = %guild_id, error = %message, "Guild sync aborted");

                status
                    .set_status(guild_id, SyncStatus::Error, None, Some(message.clone()))
                    .await?;

                Ok(SyncReport::failed(message))
            }
        }
    }

    /// Steps 2-4 of a run: probe, fetch, batch-upsert
    async fn run_sync(&self, guild_id: &str) -> Result<SyncOutcome, SyncAbort> {
        let check = self.ctx.discord().validate_bot_permissions(guild_id).await;
        if !check.has_permissions {
            return Err(SyncAbort::MissingPermissions(
                check.missing_permissions.join(", "),
            ));
        }

        let guild = self.ctx.discord().get_guild(guild_id).await?;
        let members = self.ctx.discord().get_all_guild_members(guild_id).await?;
        let total_members = members.len();

        info!(
            guild_id = %guild_id,
            guild_name = %guild.name,
            total = total_members,
            "Fetched guild member list"
        );

        let mut synced_members = 0;
        let mut linked_members = 0;
        let mut errors = Vec::new();

        for (index, batch) in members.chunks(self.ctx.sync_batch_size()).enumerate() {
            match self.process_batch(guild_id, batch).await {
                Ok(outcome) => {
                    synced_members += outcome.synced;
                    linked_members += outcome.linked;
                }
                Err(e) => {
                    warn!(
                        guild_id = %guild_id,
                        batch = index,
                        error = %e,
                        "Batch failed during guild sync"
                    );
                    errors.push(format!("batch {index}: {e}"));
                }
            }
        }

        Ok(SyncOutcome {
            guild_name: guild.name,
            total_members,
            synced_members,
            linked_members,
            errors,
        })
    }

    /// Persist one batch of member records.
    ///
    /// Bots are skipped entirely. One member's failure is logged and skipped
    /// without aborting the rest of the batch.
    async fn process_batch(
        &self,
        guild_id: &str,
        batch: &[DiscordGuildMember],
    ) -> ServiceResult<BatchOutcome> {
        let mut outcome = BatchOutcome::default();

        for record in batch {
            if record.is_bot() {
                continue;
            }

            match self.upsert_member(guild_id, record).await {
                Ok(linked) => {
                    outcome.synced += 1;
                    if linked {
                        outcome.linked += 1;
                    }
                }
                Err(e) => {
                    warn!(
                        guild_id = %guild_id,
                        discord_id = %record.user.id,
                        error = %e,
                        "Failed to sync member, skipping"
                    );
                }
            }
        }

        Ok(outcome)
    }

    /// Resolve the member's local user and upsert the mirror row.
    /// Returns whether a local user was attached (always, given the
    /// resolver's placeholder guarantee).
    async fn upsert_member(
        &self,
        guild_id: &str,
        record: &DiscordGuildMember,
    ) -> ServiceResult<bool> {
        let user_id = self.resolve_member_user(guild_id, record).await?;

        let mut member = DiscordMember::new(
            record.user.id.clone(),
            guild_id.to_string(),
            record.user.username.clone(),
        );
        member.discriminator = record.user.discriminator.clone();
        member.display_name = record
            .nick
            .clone()
            .or_else(|| record.user.global_name.clone());
        member.avatar_hash = record.user.avatar.clone();
        member.joined_at = record.joined_at;
        member.link(user_id);

        self.ctx.member_repo().upsert(&member).await?;

        Ok(member.is_linked())
    }

    /// Map one external member to exactly one local user id.
    ///
    /// Resolution order, first match wins:
    /// 1. OAuth account linked to this Discord id
    /// 2. linked user on the existing mirror row for (discord_id, guild_id)
    /// 3. a freshly provisioned placeholder user
    ///
    /// Never resolves to "no identity".
    async fn resolve_member_user(
        &self,
        guild_id: &str,
        record: &DiscordGuildMember,
    ) -> ServiceResult<Uuid> {
        if let Some(account) = self
            .ctx
            .account_repo()
            .find_by_provider_account(DISCORD_PROVIDER, &record.user.id)
            .await?
        {
            return Ok(account.user_id);
        }

        if let Some(existing) = self.ctx.member_repo().find(guild_id, &record.user.id).await? {
            if let Some(user_id) = existing.linked_user_id {
                return Ok(user_id);
            }
        }

        let name = record
            .user
            .global_name
            .clone()
            .or_else(|| record.nick.clone())
            .filter(|n| !n.is_empty())
            .or_else(|| Some(record.user.username.clone()))
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| DEFAULT_MEMBER_NAME.to_string());

        let avatar = avatar_url(
            &record.user.id,
            record.user.avatar.as_deref(),
            PLACEHOLDER_AVATAR_SIZE,
        );

        let user = User::placeholder(name, avatar);
        self.ctx.user_repo().create(&user).await?;

        info!(
            user_id = %user.id,
            discord_id = %record.user.id,
            "Provisioned placeholder user for unlinked member"
        );

        Ok(user.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{guild_member, TestHarness};
    use guildhall_core::entities::LinkedAccount;

    #[tokio::test]
    async fn test_sync_creates_mirror_rows_and_completes() {
        let harness = TestHarness::new().with_members(vec![
            guild_member("1", "alice", false),
            guild_member("2", "bob", false),
        ]);
        let service = GuildSyncService::new(harness.ctx());

        let report = service.sync_guild("g1").await.unwrap();

        assert!(report.success);
        assert_eq!(report.total_members, 2);
        assert_eq!(report.synced_members, 2);
        assert_eq!(report.linked_members, 2);

        let state = harness.sync_state("g1").unwrap();
        assert_eq!(state.status, SyncStatus::Completed);
        assert_eq!(state.guild_name.as_deref(), Some("Test Guild"));
        assert_eq!(state.total_members, Some(2));
        assert_eq!(state.synced_members, Some(2));

        assert!(harness.member("g1", "1").unwrap().is_linked());
        assert!(harness.member("g1", "2").unwrap().is_linked());
    }

    #[tokio::test]
    async fn test_sync_is_idempotent() {
        let harness =
            TestHarness::new().with_members(vec![guild_member("1", "alice", false)]);
        let service = GuildSyncService::new(harness.ctx());

        service.sync_guild("g1").await.unwrap();
        let first = harness.member("g1", "1").unwrap();

        service.sync_guild("g1").await.unwrap();
        let second = harness.member("g1", "1").unwrap();

        assert_eq!(harness.member_count("g1"), 1);
        assert_eq!(first.linked_user_id, second.linked_user_id);
        assert!(second.synced_at >= first.synced_at);
        assert_eq!(harness.user_count(), 1);
    }

    #[tokio::test]
    async fn test_oauth_account_outranks_prior_mirror_link() {
        let oauth_user_id = Uuid::new_v4();
        let stale_user_id = Uuid::new_v4();

        let harness = TestHarness::new()
            .with_members(vec![guild_member("1", "alice", false)])
            .with_account(LinkedAccount::new(
                oauth_user_id,
                DISCORD_PROVIDER.to_string(),
                "1".to_string(),
            ))
            .with_mirror_row("g1", "1", "alice", Some(stale_user_id));
        let service = GuildSyncService::new(harness.ctx());

        service.sync_guild("g1").await.unwrap();

        let member = harness.member("g1", "1").unwrap();
        assert_eq!(member.linked_user_id, Some(oauth_user_id));
    }

    #[tokio::test]
    async fn test_prior_mirror_link_reused_without_account() {
        let prior_user_id = Uuid::new_v4();

        let harness = TestHarness::new()
            .with_members(vec![guild_member("1", "alice", false)])
            .with_mirror_row("g1", "1", "alice", Some(prior_user_id));
        let service = GuildSyncService::new(harness.ctx());

        service.sync_guild("g1").await.unwrap();

        let member = harness.member("g1", "1").unwrap();
        assert_eq!(member.linked_user_id, Some(prior_user_id));
        assert_eq!(harness.user_count(), 0);
    }

    #[tokio::test]
    async fn test_placeholder_provisioned_for_unknown_member() {
        let mut record = guild_member("1", "alice", false);
        record.user.global_name = Some("Alice".to_string());
        record.user.avatar = Some("abc".to_string());

        let harness = TestHarness::new().with_members(vec![record]);
        let service = GuildSyncService::new(harness.ctx());

        service.sync_guild("g1").await.unwrap();

        assert_eq!(harness.user_count(), 1);
        let user = harness.only_user();
        assert!(user.is_placeholder());
        assert_eq!(user.name, "Alice");
        assert_eq!(
            user.avatar_url.as_deref(),
            Some("https://cdn.discordapp.com/avatars/1/abc.png?size=256")
        );

        let member = harness.member("g1", "1").unwrap();
        assert_eq!(member.linked_user_id, Some(user.id));
    }

    #[tokio::test]
    async fn test_bots_are_not_mirrored() {
        let harness = TestHarness::new().with_members(vec![
            guild_member("1", "robo", true),
            guild_member("2", "beep", true),
        ]);
        let service = GuildSyncService::new(harness.ctx());

        let report = service.sync_guild("g1").await.unwrap();

        assert!(report.success);
        assert_eq!(report.total_members, 2);
        assert_eq!(report.synced_members, 0);
        assert_eq!(harness.member_count("g1"), 0);
        assert_eq!(harness.user_count(), 0);
    }

    #[tokio::test]
    async fn test_one_bad_member_does_not_abort_the_batch() {
        let harness = TestHarness::new()
            .with_members(vec![
                guild_member("1", "alice", false),
                guild_member("2", "broken", false),
                guild_member("3", "carol", false),
            ])
            .with_failing_upsert("2");
        let service = GuildSyncService::new(harness.ctx());

        let report = service.sync_guild("g1").await.unwrap();

        assert!(report.success);
        assert_eq!(report.total_members, 3);
        assert_eq!(report.synced_members, 2);
        assert!(harness.member("g1", "2").is_none());
        assert!(harness.member("g1", "3").is_some());
    }

    #[tokio::test]
    async fn test_missing_permissions_aborts_with_error_status() {
        let harness = TestHarness::new().deny_permissions();
        let service = GuildSyncService::new(harness.ctx());

        let report = service.sync_guild("g1").await.unwrap();

        assert!(!report.success);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("Missing required permissions"));

        let state = harness.sync_state("g1").unwrap();
        assert_eq!(state.status, SyncStatus::Error);
        assert!(state.last_error.is_some());
    }

    #[tokio::test]
    async fn test_guild_fetch_failure_preserves_prior_sync_time() {
        let harness =
            TestHarness::new().with_members(vec![guild_member("1", "alice", false)]);

        {
            let service = GuildSyncService::new(harness.ctx());
            service.sync_guild("g1").await.unwrap();
        }
        let completed_at = harness.sync_state("g1").unwrap().last_synced_at;
        assert!(completed_at.is_some());

        harness.fail_guild_fetch();
        let service = GuildSyncService::new(harness.ctx());
        let report = service.sync_guild("g1").await.unwrap();

        assert!(!report.success);
        let state = harness.sync_state("g1").unwrap();
        assert_eq!(state.status, SyncStatus::Error);
        assert_eq!(state.last_synced_at, completed_at);
        assert!(state.last_error.is_some());
    }

    #[tokio::test]
    async fn test_example_scenario_bot_plus_linked_human() {
        let u7 = Uuid::new_v4();
        let harness = TestHarness::new()
            .with_members(vec![
                guild_member("10", "bot-helper", true),
                guild_member("11", "human", false),
            ])
            .with_account(LinkedAccount::new(
                u7,
                DISCORD_PROVIDER.to_string(),
                "11".to_string(),
            ));
        let service = GuildSyncService::new(harness.ctx());

        let report = service.sync_guild("g1").await.unwrap();

        assert!(report.success);
        assert_eq!(report.total_members, 2);
        assert_eq!(report.synced_members, 1);
        assert_eq!(report.linked_members, 1);

        assert_eq!(harness.member_count("g1"), 1);
        let member = harness.member("g1", "11").unwrap();
        assert_eq!(member.linked_user_id, Some(u7));

        let state = harness.sync_state("g1").unwrap();
        assert_eq!(state.status, SyncStatus::Completed);
        assert_eq!(state.total_members, Some(2));
        assert_eq!(state.synced_members, Some(1));
    }
}
