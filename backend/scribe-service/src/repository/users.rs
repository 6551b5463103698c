use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::domain::User;
use crate::error::Result;
use crate::repository::UserRepository;

/// PostgreSQL user read-model. Rows mirror identity records owned by the
/// authentication service and are provisioned by upsert from validated
/// token claims, so follow/post writes never hit a missing FK.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UserRepository for PostgresUserRepository {
    async fn upsert(&self, id: Uuid, username: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, created_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (id) DO UPDATE SET username = EXCLUDED.username
            "#,
        )
        .bind(id)
        .bind(username)
        .execute(&self.pool)
        .await?;

        debug!("Upserted user {} ({})", id, username);

        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, display_name, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
