use std::sync::Arc;
use uuid::Uuid;

use crate::domain::Comment;
use crate::error::{AppError, Result};
use crate::middleware::CurrentUser;
use crate::repository::{CommentRepository, PostRepository, UserRepository};

/// Comment operations on posts
#[derive(Clone)]
pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
}

impl CommentService {
    pub fn new(
        comments: Arc<dyn CommentRepository>,
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            comments,
            posts,
            users,
        }
    }

    /// Add a comment to a post for the authenticated actor
    pub async fn add(&self, actor: &CurrentUser, post_id: Uuid, text: &str) -> Result<Comment> {
        if text.trim().is_empty() {
            return Err(AppError::Validation(
                "comment text must not be empty".into(),
            ));
        }

        if self.posts.find_by_id(post_id).await?.is_none() {
            return Err(AppError::NotFound(format!("post {} not found", post_id)));
        }

        self.users.upsert(actor.id, &actor.username).await?;
        self.comments.create(post_id, actor.id, text).await
    }

    /// A post's comments, oldest first
    pub async fn for_post(&self, post_id: Uuid) -> Result<Vec<Comment>> {
        self.comments.for_post(post_id).await
    }
}
