use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::domain::Post;
use crate::error::Result;
use crate::metrics;
use crate::repository::{FollowRepository, PostRepository};

/// Feed composition: the posts authored by anyone the viewer follows,
/// newest first (creation timestamp descending, post id descending on
/// ties). A derived, read-only view recomputed from the follow graph and
/// the post store on every call; no state is held between calls.
#[derive(Clone)]
pub struct FeedService {
    follows: Arc<dyn FollowRepository>,
    posts: Arc<dyn PostRepository>,
}

impl FeedService {
    pub fn new(follows: Arc<dyn FollowRepository>, posts: Arc<dyn PostRepository>) -> Self {
        Self { follows, posts }
    }

    /// One page of the viewer's feed plus the total count. Anonymous
    /// viewers and viewers with no followees get an empty page, not an
    /// error.
    pub async fn feed_for(
        &self,
        viewer: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Post>, i64)> {
        let viewer_id = match viewer {
            Some(id) => id,
            None => {
                metrics::FEED_REQUESTS.with_label_values(&["empty"]).inc();
                return Ok((Vec::new(), 0));
            }
        };

        let followees = self.follows.followees_of(viewer_id).await?;
        if followees.is_empty() {
            debug!("Feed for {}: no followees", viewer_id);
            metrics::FEED_REQUESTS.with_label_values(&["empty"]).inc();
            return Ok((Vec::new(), 0));
        }

        let page = self.posts.by_authors(&followees, limit, offset).await?;
        metrics::FEED_REQUESTS
            .with_label_values(&["composed"])
            .inc();

        Ok(page)
    }
}
