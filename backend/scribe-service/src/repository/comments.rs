use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::domain::Comment;
use crate::error::Result;
use crate::repository::CommentRepository;

/// PostgreSQL comment store
#[derive(Clone)]
pub struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn create(&self, post_id: Uuid, author_id: Uuid, text: &str) -> Result<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (id, post_id, author_id, text, created_at)
            VALUES ($1, $2, $3, $4, NOW())
            RETURNING id, post_id, author_id, text, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(post_id)
        .bind(author_id)
        .bind(text)
        .fetch_one(&self.pool)
        .await?;

        debug!("Created comment {} on post {}", comment.id, post_id);

        Ok(comment)
    }

    async fn for_post(&self, post_id: Uuid) -> Result<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, post_id, author_id, text, created_at
            FROM comments
            WHERE post_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }
}
