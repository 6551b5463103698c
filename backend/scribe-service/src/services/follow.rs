use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::domain::User;
use crate::error::{AppError, Result};
use crate::metrics;
use crate::middleware::CurrentUser;
use crate::repository::{FollowRepository, UserRepository};

/// Follow graph operations. Enforces the edge policies: no self-follow,
/// idempotent create, silent idempotent delete, unknown targets rejected.
#[derive(Clone)]
pub struct FollowService {
    users: Arc<dyn UserRepository>,
    follows: Arc<dyn FollowRepository>,
}

impl FollowService {
    pub fn new(users: Arc<dyn UserRepository>, follows: Arc<dyn FollowRepository>) -> Self {
        Self { users, follows }
    }

    async fn resolve_target(&self, username: &str) -> Result<User> {
        self.users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user '{}' not found", username)))
    }

    /// Follow a user by username. A self-follow is a silent no-op and an
    /// existing edge is left untouched; only an unknown target is an error.
    pub async fn follow(&self, actor: &CurrentUser, target_username: &str) -> Result<()> {
        self.users.upsert(actor.id, &actor.username).await?;
        let target = self.resolve_target(target_username).await?;

        if target.id == actor.id {
            debug!("Ignoring self-follow attempt by {}", actor.id);
            return Ok(());
        }

        let created = self.follows.create_follow(actor.id, target.id).await?;
        if created {
            metrics::FOLLOW_EVENTS.with_label_values(&["follow"]).inc();
        }

        Ok(())
    }

    /// Unfollow a user by username. Removing an absent edge silently
    /// succeeds; only an unknown target is an error.
    pub async fn unfollow(&self, actor: &CurrentUser, target_username: &str) -> Result<()> {
        let target = self.resolve_target(target_username).await?;

        let deleted = self.follows.delete_follow(actor.id, target.id).await?;
        if deleted {
            metrics::FOLLOW_EVENTS
                .with_label_values(&["unfollow"])
                .inc();
        }

        Ok(())
    }

    /// Whether the viewer follows the target. Anonymous viewers follow
    /// nobody, so `None` always reports false.
    pub async fn is_following(&self, viewer: Option<Uuid>, target_id: Uuid) -> Result<bool> {
        match viewer {
            Some(viewer_id) => self.follows.is_following(viewer_id, target_id).await,
            None => Ok(false),
        }
    }
}
