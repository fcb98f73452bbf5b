//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::{DiscordMember, GuildSyncState, LinkedAccount, User};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>>;

    /// Create a new user (real or placeholder)
    async fn create(&self, user: &User) -> RepoResult<()>;

    /// Merge a placeholder user into a real user: repoint every row
    /// referencing `placeholder_id` to `target_id`, then delete the
    /// placeholder. Runs as a single transaction.
    async fn merge_placeholder(&self, placeholder_id: Uuid, target_id: Uuid) -> RepoResult<()>;
}

// ============================================================================
// Account Repository
// ============================================================================

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account link by provider and provider-side account id
    async fn find_by_provider_account(
        &self,
        provider: &str,
        provider_account_id: &str,
    ) -> RepoResult<Option<LinkedAccount>>;

    /// Record a new account link
    async fn create(&self, account: &LinkedAccount) -> RepoResult<()>;
}

// ============================================================================
// Discord Member Repository
// ============================================================================

/// Listing options for the member directory
#[derive(Debug, Clone, Default)]
pub struct MemberPage {
    /// Substring match on username or display name
    pub search: Option<String>,
    pub skip: i64,
    pub take: i64,
}

#[async_trait]
pub trait DiscordMemberRepository: Send + Sync {
    /// Find one mirror row by guild and external member id
    async fn find(&self, guild_id: &str, discord_id: &str) -> RepoResult<Option<DiscordMember>>;

    /// Insert or update a mirror row, keyed by (discord_id, guild_id)
    async fn upsert(&self, member: &DiscordMember) -> RepoResult<()>;

    /// List mirror rows for a guild with optional search and skip/take
    async fn find_by_guild(&self, guild_id: &str, page: &MemberPage)
        -> RepoResult<Vec<DiscordMember>>;

    /// Count mirror rows for a guild
    async fn count_by_guild(&self, guild_id: &str) -> RepoResult<i64>;

    /// Find every mirror row for one external member id, across guilds
    async fn find_by_discord_id(&self, discord_id: &str) -> RepoResult<Vec<DiscordMember>>;

    /// Set or clear the linked local user on one mirror row
    async fn set_linked_user(
        &self,
        guild_id: &str,
        discord_id: &str,
        user_id: Option<Uuid>,
    ) -> RepoResult<()>;
}

// ============================================================================
// Sync State Repository
// ============================================================================

#[async_trait]
pub trait SyncStateRepository: Send + Sync {
    /// Find the sync state for a guild
    async fn find(&self, guild_id: &str) -> RepoResult<Option<GuildSyncState>>;

    /// Insert or update the sync state, keyed by guild_id
    async fn upsert(&self, state: &GuildSyncState) -> RepoResult<()>;
}
