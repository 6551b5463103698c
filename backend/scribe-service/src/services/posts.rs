use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Group, Post, User};
use crate::error::{AppError, Result};
use crate::middleware::CurrentUser;
use crate::repository::{GroupRepository, PostRepository, UserRepository};

/// Post operations: creation, author-only editing, and the listing reads
/// behind the index, group, and profile pages.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    groups: Arc<dyn GroupRepository>,
    users: Arc<dyn UserRepository>,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        groups: Arc<dyn GroupRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            posts,
            groups,
            users,
        }
    }

    fn validate_text(text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Err(AppError::Validation("post text must not be empty".into()));
        }
        Ok(())
    }

    async fn validate_group(&self, group_id: Option<Uuid>) -> Result<()> {
        if let Some(id) = group_id {
            if !self.groups.exists(id).await? {
                return Err(AppError::Validation(format!("unknown group {}", id)));
            }
        }
        Ok(())
    }

    /// Create a post for the authenticated actor
    pub async fn create(
        &self,
        actor: &CurrentUser,
        text: &str,
        group_id: Option<Uuid>,
        image_key: Option<&str>,
    ) -> Result<Post> {
        Self::validate_text(text)?;
        self.validate_group(group_id).await?;

        self.users.upsert(actor.id, &actor.username).await?;
        self.posts.create(actor.id, group_id, text, image_key).await
    }

    /// Edit a post. Only the author may edit; the creation timestamp and
    /// authorship never change.
    pub async fn edit(
        &self,
        actor_id: Uuid,
        post_id: Uuid,
        text: &str,
        group_id: Option<Uuid>,
        image_key: Option<&str>,
    ) -> Result<Post> {
        let post = self.get(post_id).await?;
        if post.author_id != actor_id {
            return Err(AppError::Forbidden(
                "only the author can edit this post".into(),
            ));
        }

        Self::validate_text(text)?;
        self.validate_group(group_id).await?;

        self.posts.update(post_id, text, group_id, image_key).await
    }

    pub async fn get(&self, post_id: Uuid) -> Result<Post> {
        self.posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {} not found", post_id)))
    }

    /// All posts, newest first
    pub async fn index(&self, limit: i64, offset: i64) -> Result<(Vec<Post>, i64)> {
        self.posts.recent(limit, offset).await
    }

    /// A group's posts by slug, newest first
    pub async fn by_group_slug(
        &self,
        slug: &str,
        limit: i64,
        offset: i64,
    ) -> Result<(Group, Vec<Post>, i64)> {
        let group = self
            .groups
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("group '{}' not found", slug)))?;

        let (posts, total) = self.posts.by_group(group.id, limit, offset).await?;
        Ok((group, posts, total))
    }

    /// An author's posts by username, newest first
    pub async fn by_author_username(
        &self,
        username: &str,
        limit: i64,
        offset: i64,
    ) -> Result<(User, Vec<Post>, i64)> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user '{}' not found", username)))?;

        let (posts, total) = self.posts.by_author(user.id, limit, offset).await?;
        Ok((user, posts, total))
    }
}
