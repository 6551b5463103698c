use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::error::Result;
use crate::repository::FollowRepository;

/// PostgreSQL follow-edge store (source of truth).
///
/// Uniqueness of the (follower_id, followee_id) pair and the
/// no-self-follow rule are backed by schema constraints, so the
/// idempotent insert below can never create a duplicate edge.
#[derive(Clone)]
pub struct PostgresFollowRepository {
    pool: PgPool,
}

impl PostgresFollowRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl FollowRepository for PostgresFollowRepository {
    async fn create_follow(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool> {
        let inserted = sqlx::query_as::<_, (Uuid,)>(
            r#"
            INSERT INTO follows (id, follower_id, followee_id, created_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (follower_id, followee_id) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(follower_id)
        .bind(followee_id)
        .fetch_optional(&self.pool)
        .await?;

        if inserted.is_some() {
            debug!("Created follow edge {} -> {}", follower_id, followee_id);
        }

        Ok(inserted.is_some())
    }

    async fn delete_follow(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND followee_id = $2")
            .bind(follower_id)
            .bind(followee_id)
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            debug!("Deleted follow edge {} -> {}", follower_id, followee_id);
        }

        Ok(deleted)
    }

    async fn is_following(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM follows WHERE follower_id = $1 AND followee_id = $2)",
        )
        .bind(follower_id)
        .bind(followee_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn followees_of(&self, follower_id: Uuid) -> Result<Vec<Uuid>> {
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            "SELECT followee_id FROM follows WHERE follower_id = $1 ORDER BY created_at DESC",
        )
        .bind(follower_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    async fn follower_count(&self, user_id: Uuid) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM follows WHERE followee_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn following_count(&self, user_id: Uuid) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM follows WHERE follower_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
