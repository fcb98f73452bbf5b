//! PostgreSQL implementation of DiscordMemberRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use guildhall_core::entities::DiscordMember;
use guildhall_core::traits::{DiscordMemberRepository, MemberPage, RepoResult};

use crate::models::DiscordMemberModel;

use super::error::{map_db_error, member_not_found};

/// PostgreSQL implementation of DiscordMemberRepository
#[derive(Clone)]
pub struct PgDiscordMemberRepository {
    pool: PgPool,
}

impl PgDiscordMemberRepository {
    /// Create a new PgDiscordMemberRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DiscordMemberRepository for PgDiscordMemberRepository {
    #[instrument(skip(self))]
    async fn find(&self, guild_id: &str, discord_id: &str) -> RepoResult<Option<DiscordMember>> {
        let result = sqlx::query_as::<_, DiscordMemberModel>(
            r#"
            SELECT discord_id, guild_id, username, discriminator, display_name,
                   avatar_hash, joined_at, linked_user_id, synced_at, sync_status
            FROM discord_members
            WHERE guild_id = $1 AND discord_id = $2
            "#,
        )
        .bind(guild_id)
        .bind(discord_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(DiscordMember::from))
    }

    #[instrument(skip(self, member), fields(guild_id = %member.guild_id, discord_id = %member.discord_id))]
    async fn upsert(&self, member: &DiscordMember) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO discord_members
                (discord_id, guild_id, username, discriminator, display_name,
                 avatar_hash, joined_at, linked_user_id, synced_at, sync_status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (discord_id, guild_id) DO UPDATE SET
                username = EXCLUDED.username,
                discriminator = EXCLUDED.discriminator,
                display_name = EXCLUDED.display_name,
                avatar_hash = EXCLUDED.avatar_hash,
                joined_at = EXCLUDED.joined_at,
                linked_user_id = EXCLUDED.linked_user_id,
                synced_at = EXCLUDED.synced_at,
                sync_status = EXCLUDED.sync_status
            "#,
        )
        .bind(&member.discord_id)
        .bind(&member.guild_id)
        .bind(&member.username)
        .bind(&member.discriminator)
        .bind(&member.display_name)
        .bind(&member.avatar_hash)
        .bind(member.joined_at)
        .bind(member.linked_user_id)
        .bind(member.synced_at)
        .bind(&member.sync_status)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_guild(
        &self,
        guild_id: &str,
        page: &MemberPage,
    ) -> RepoResult<Vec<DiscordMember>> {
        let take = page.take.clamp(1, 1000);
        let skip = page.skip.max(0);

        let results = match &page.search {
            Some(search) if !search.is_empty() => {
                let pattern = format!("%{search}%");
                sqlx::query_as::<_, DiscordMemberModel>(
                    r#"
                    SELECT discord_id, guild_id, username, discriminator, display_name,
                           avatar_hash, joined_at, linked_user_id, synced_at, sync_status
                    FROM discord_members
                    WHERE guild_id = $1
                      AND (username ILIKE $2 OR display_name ILIKE $2)
                    ORDER BY username
                    OFFSET $3 LIMIT $4
                    "#,
                )
                .bind(guild_id)
                .bind(pattern)
                .bind(skip)
                .bind(take)
                .fetch_all(&self.pool)
                .await
            }
            _ => {
                sqlx::query_as::<_, DiscordMemberModel>(
                    r#"
                    SELECT discord_id, guild_id, username, discriminator, display_name,
                           avatar_hash, joined_at, linked_user_id, synced_at, sync_status
                    FROM discord_members
                    WHERE guild_id = $1
                    ORDER BY username
                    OFFSET $2 LIMIT $3
                    "#,
                )
                .bind(guild_id)
                .bind(skip)
                .bind(take)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(DiscordMember::from).collect())
    }

    #[instrument(skip(self))]
    async fn count_by_guild(&self, guild_id: &str) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM discord_members WHERE guild_id = $1
            "#,
        )
        .bind(guild_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self))]
    async fn find_by_discord_id(&self, discord_id: &str) -> RepoResult<Vec<DiscordMember>> {
        let results = sqlx::query_as::<_, DiscordMemberModel>(
            r#"
            SELECT discord_id, guild_id, username, discriminator, display_name,
                   avatar_hash, joined_at, linked_user_id, synced_at, sync_status
            FROM discord_members
            WHERE discord_id = $1
            "#,
        )
        .bind(discord_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(DiscordMember::from).collect())
    }

    #[instrument(skip(self))]
    async fn set_linked_user(
        &self,
        guild_id: &str,
        discord_id: &str,
        user_id: Option<Uuid>,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE discord_members
            SET linked_user_id = $3
            WHERE guild_id = $1 AND discord_id = $2
            "#,
        )
        .bind(guild_id)
        .bind(discord_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(member_not_found());
        }

        Ok(())
    }
}
