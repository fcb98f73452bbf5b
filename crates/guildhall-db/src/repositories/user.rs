//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use guildhall_core::entities::User;
use guildhall_core::traits::{RepoResult, UserRepository};

use crate::models::UserModel;

use super::error::{map_db_error, user_not_found};

/// Tables and columns holding references to users.id.
///
/// The placeholder merge repoints each of these before deleting the
/// placeholder row; add new dependent tables here as the schema grows.
const USER_ID_REFERENCES: &[(&str, &str)] = &[
    ("discord_members", "linked_user_id"),
    ("accounts", "user_id"),
];

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r#"
            SELECT id, name, email, avatar_url, placeholder, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn create(&self, user: &User) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, avatar_url, placeholder, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.avatar_url)
        .bind(user.placeholder)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn merge_placeholder(&self, placeholder_id: Uuid, target_id: Uuid) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        for (table, column) in USER_ID_REFERENCES {
            let sql = format!("UPDATE {table} SET {column} = $1 WHERE {column} = $2");
            sqlx::query(&sql)
                .bind(target_id)
                .bind(placeholder_id)
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
        }

        // Only placeholders may be merged away; a real account id here is a
        // caller bug and must not delete anything.
        let result = sqlx::query("DELETE FROM users WHERE id = $1 AND placeholder = TRUE")
            .bind(placeholder_id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(placeholder_id));
        }

        tx.commit().await.map_err(map_db_error)?;

        info!(
            placeholder_id = %placeholder_id,
            target_id = %target_id,
            "Merged placeholder user"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgUserRepository>();
    }

    #[test]
    fn test_reference_list_covers_linking_tables() {
        let tables: Vec<&str> = USER_ID_REFERENCES.iter().map(|(t, _)| *t).collect();
        assert!(tables.contains(&"discord_members"));
        assert!(tables.contains(&"accounts"));
    }
}
