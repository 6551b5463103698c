use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::domain::Post;
use crate::error::Result;
use crate::repository::PostRepository;

/// PostgreSQL post store. Listings order by (created_at DESC, id DESC)
/// so pages are deterministic even for identical timestamps.
#[derive(Clone)]
pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(
        &self,
        author_id: Uuid,
        group_id: Option<Uuid>,
        text: &str,
        image_key: Option<&str>,
    ) -> Result<Post> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (id, author_id, group_id, text, image_key, created_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            RETURNING id, author_id, group_id, text, image_key, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(author_id)
        .bind(group_id)
        .bind(text)
        .bind(image_key)
        .fetch_one(&self.pool)
        .await?;

        debug!("Created post {} by {}", post.id, author_id);

        Ok(post)
    }

    async fn update(
        &self,
        id: Uuid,
        text: &str,
        group_id: Option<Uuid>,
        image_key: Option<&str>,
    ) -> Result<Post> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET text = $2, group_id = $3, image_key = $4
            WHERE id = $1
            RETURNING id, author_id, group_id, text, image_key, created_at
            "#,
        )
        .bind(id)
        .bind(text)
        .bind(group_id)
        .bind(image_key)
        .fetch_one(&self.pool)
        .await?;

        debug!("Updated post {}", id);

        Ok(post)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, author_id, group_id, text, image_key, created_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn recent(&self, limit: i64, offset: i64) -> Result<(Vec<Post>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await?;

        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, author_id, group_id, text, image_key, created_at
            FROM posts
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((posts, total))
    }

    async fn by_authors(
        &self,
        author_ids: &[Uuid],
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Post>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE author_id = ANY($1)")
            .bind(author_ids)
            .fetch_one(&self.pool)
            .await?;

        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, author_id, group_id, text, image_key, created_at
            FROM posts
            WHERE author_id = ANY($1)
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(author_ids)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((posts, total))
    }

    async fn by_author(
        &self,
        author_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Post>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE author_id = $1")
            .bind(author_id)
            .fetch_one(&self.pool)
            .await?;

        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, author_id, group_id, text, image_key, created_at
            FROM posts
            WHERE author_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(author_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((posts, total))
    }

    async fn by_group(&self, group_id: Uuid, limit: i64, offset: i64) -> Result<(Vec<Post>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE group_id = $1")
            .bind(group_id)
            .fetch_one(&self.pool)
            .await?;

        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, author_id, group_id, text, image_key, created_at
            FROM posts
            WHERE group_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(group_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((posts, total))
    }

    async fn count_by_author(&self, author_id: Uuid) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE author_id = $1")
            .bind(author_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
