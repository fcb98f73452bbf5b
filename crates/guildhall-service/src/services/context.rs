//! Service context - dependency container for services
//!
//! Holds the repositories, the directory API client, and the cache instance
//! needed by services.

use std::sync::Arc;

use guildhall_cache::MemoryCache;
use guildhall_core::traits::{
    AccountRepository, DiscordMemberRepository, SyncStateRepository, UserRepository,
};
use guildhall_db::PgPool;
use guildhall_discord::DiscordApi;

/// Default number of members persisted per batch during a sync
const DEFAULT_SYNC_BATCH_SIZE: usize = 100;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - The Discord directory API client
/// - The in-process cache (one instance per process, injected here)
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool
    pool: PgPool,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    account_repo: Arc<dyn AccountRepository>,
    member_repo: Arc<dyn DiscordMemberRepository>,
    sync_state_repo: Arc<dyn SyncStateRepository>,

    // External directory
    discord: Arc<dyn DiscordApi>,

    // Cache
    cache: Arc<MemoryCache>,

    // Sync tuning
    sync_batch_size: usize,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        pool: PgPool,
        user_repo: Arc<dyn UserRepository>,
        account_repo: Arc<dyn AccountRepository>,
        member_repo: Arc<dyn DiscordMemberRepository>,
        sync_state_repo: Arc<dyn SyncStateRepository>,
        discord: Arc<dyn DiscordApi>,
        cache: Arc<MemoryCache>,
        sync_batch_size: usize,
    ) -> Self {
        Self {
            pool,
            user_repo,
            account_repo,
            member_repo,
            sync_state_repo,
            discord,
            cache,
            sync_batch_size,
        }
    }

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the account repository
    pub fn account_repo(&self) -> &dyn AccountRepository {
        self.account_repo.as_ref()
    }

    /// Get the Discord member repository
    pub fn member_repo(&self) -> &dyn DiscordMemberRepository {
        self.member_repo.as_ref()
    }

    /// Get the sync state repository
    pub fn sync_state_repo(&self) -> &dyn SyncStateRepository {
        self.sync_state_repo.as_ref()
    }

    /// Get the Discord directory API client
    pub fn discord(&self) -> &dyn DiscordApi {
        self.discord.as_ref()
    }

    /// Get the cache instance
    pub fn cache(&self) -> &MemoryCache {
        self.cache.as_ref()
    }

    /// Members persisted per batch during a sync
    pub fn sync_batch_size(&self) -> usize {
        self.sync_batch_size
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("repositories", &"...")
            .field("discord", &"DiscordApi")
            .field("sync_batch_size", &self.sync_batch_size)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    account_repo: Option<Arc<dyn AccountRepository>>,
    member_repo: Option<Arc<dyn DiscordMemberRepository>>,
    sync_state_repo: Option<Arc<dyn SyncStateRepository>>,
    discord: Option<Arc<dyn DiscordApi>>,
    cache: Option<Arc<MemoryCache>>,
    sync_batch_size: usize,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            pool: None,
            user_repo: None,
            account_repo: None,
            member_repo: None,
            sync_state_repo: None,
            discord: None,
            cache: None,
            sync_batch_size: DEFAULT_SYNC_BATCH_SIZE,
        }
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn account_repo(mut self, repo: Arc<dyn AccountRepository>) -> Self {
        self.account_repo = Some(repo);
        self
    }

    pub fn member_repo(mut self, repo: Arc<dyn DiscordMemberRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn sync_state_repo(mut self, repo: Arc<dyn SyncStateRepository>) -> Self {
        self.sync_state_repo = Some(repo);
        self
    }

    pub fn discord(mut self, discord: Arc<dyn DiscordApi>) -> Self {
        self.discord = Some(discord);
        self
    }

    pub fn cache(mut self, cache: Arc<MemoryCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn sync_batch_size(mut self, size: usize) -> Self {
        self.sync_batch_size = size.max(1);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.pool
                .ok_or_else(|| super::error::ServiceError::validation("pool is required"))?,
            self.user_repo
                .ok_or_else(|| super::error::ServiceError::validation("user_repo is required"))?,
            self.account_repo
                .ok_or_else(|| super::error::ServiceError::validation("account_repo is required"))?,
            self.member_repo
                .ok_or_else(|| super::error::ServiceError::validation("member_repo is required"))?,
            self.sync_state_repo
                .ok_or_else(|| super::error::ServiceError::validation("sync_state_repo is required"))?,
            self.discord
                .ok_or_else(|| super::error::ServiceError::validation("discord is required"))?,
            self.cache
                .ok_or_else(|| super::error::ServiceError::validation("cache is required"))?,
            self.sync_batch_size,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
