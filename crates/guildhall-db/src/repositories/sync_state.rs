//! PostgreSQL implementation of SyncStateRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use guildhall_core::entities::GuildSyncState;
use guildhall_core::traits::{RepoResult, SyncStateRepository};

use crate::models::GuildSyncStateModel;

use super::error::map_db_error;

/// PostgreSQL implementation of SyncStateRepository
#[derive(Clone)]
pub struct PgSyncStateRepository {
    pool: PgPool,
}

impl PgSyncStateRepository {
    /// Create a new PgSyncStateRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SyncStateRepository for PgSyncStateRepository {
    #[instrument(skip(self))]
    async fn find(&self, guild_id: &str) -> RepoResult<Option<GuildSyncState>> {
        let result = sqlx::query_as::<_, GuildSyncStateModel>(
            r#"
            SELECT guild_id, guild_name, status, last_synced_at,
                   total_members, synced_members, last_error, created_at, updated_at
            FROM guild_sync_states
            WHERE guild_id = $1
            "#,
        )
        .bind(guild_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(GuildSyncState::from))
    }

    #[instrument(skip(self, state), fields(guild_id = %state.guild_id, status = %state.status))]
    async fn upsert(&self, state: &GuildSyncState) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO guild_sync_states
                (guild_id, guild_name, status, last_synced_at,
                 total_members, synced_members, last_error, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (guild_id) DO UPDATE SET
                guild_name = EXCLUDED.guild_name,
                status = EXCLUDED.status,
                last_synced_at = EXCLUDED.last_synced_at,
                total_members = EXCLUDED.total_members,
                synced_members = EXCLUDED.synced_members,
                last_error = EXCLUDED.last_error,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(&state.guild_id)
        .bind(&state.guild_name)
        .bind(state.status.as_str())
        .bind(state.last_synced_at)
        .bind(state.total_members)
        .bind(state.synced_members)
        .bind(&state.last_error)
        .bind(state.created_at)
        .bind(state.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgSyncStateRepository>();
    }
}
