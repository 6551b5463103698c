use std::sync::Arc;
use uuid::Uuid;

use crate::domain::User;
use crate::error::{AppError, Result};
use crate::repository::{FollowRepository, PostRepository, UserRepository};

/// Everything the profile page shows about a user
#[derive(Debug, Clone)]
pub struct ProfileView {
    pub user: User,
    pub post_count: i64,
    pub follower_count: i64,
    pub following_count: i64,
    /// Whether the viewer follows this user; false for anonymous viewers
    pub following: bool,
}

/// User directory reads composed for the profile page
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
    follows: Arc<dyn FollowRepository>,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        follows: Arc<dyn FollowRepository>,
    ) -> Self {
        Self {
            users,
            posts,
            follows,
        }
    }

    pub async fn profile(&self, username: &str, viewer: Option<Uuid>) -> Result<ProfileView> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user '{}' not found", username)))?;

        let post_count = self.posts.count_by_author(user.id).await?;
        let follower_count = self.follows.follower_count(user.id).await?;
        let following_count = self.follows.following_count(user.id).await?;
        let following = match viewer {
            Some(viewer_id) => self.follows.is_following(viewer_id, user.id).await?,
            None => false,
        };

        Ok(ProfileView {
            user,
            post_count,
            follower_count,
            following_count,
            following,
        })
    }
}
