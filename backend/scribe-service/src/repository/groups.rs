use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::Group;
use crate::error::Result;
use crate::repository::GroupRepository;

/// PostgreSQL group directory. Groups are provisioned out-of-band; the
/// service only reads them.
#[derive(Clone)]
pub struct PostgresGroupRepository {
    pool: PgPool,
}

impl PostgresGroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl GroupRepository for PostgresGroupRepository {
    async fn list(&self) -> Result<Vec<Group>> {
        let groups = sqlx::query_as::<_, Group>(
            r#"
            SELECT id, title, slug, description, created_at
            FROM post_groups
            ORDER BY title ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(groups)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>> {
        let group = sqlx::query_as::<_, Group>(
            r#"
            SELECT id, title, slug, description, created_at
            FROM post_groups
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(group)
    }

    async fn exists(&self, id: Uuid) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM post_groups WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}
