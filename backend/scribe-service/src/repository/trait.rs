use crate::domain::{Comment, Group, Post, User};
use crate::error::Result;
use uuid::Uuid;

/// Interface for the follow-edge store. The PostgreSQL implementation is
/// the production backend; tests inject an in-memory double.
#[async_trait::async_trait]
pub trait FollowRepository: Send + Sync {
    /// Create a follow edge if absent.
    /// Returns true when a new edge was written, false when it already existed.
    async fn create_follow(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool>;

    /// Delete a follow edge.
    /// Returns true when an edge existed, false when there was nothing to delete.
    async fn delete_follow(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool>;

    /// Check whether follower is following followee
    async fn is_following(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool>;

    /// All users the given user follows
    async fn followees_of(&self, follower_id: Uuid) -> Result<Vec<Uuid>>;

    /// Number of users following the given user
    async fn follower_count(&self, user_id: Uuid) -> Result<i64>;

    /// Number of users the given user follows
    async fn following_count(&self, user_id: Uuid) -> Result<i64>;
}

/// Interface for post storage. Every listing is ordered newest-first
/// (created_at descending, id descending as the tie-break) and returns
/// the page of rows together with the total row count.
#[async_trait::async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(
        &self,
        author_id: Uuid,
        group_id: Option<Uuid>,
        text: &str,
        image_key: Option<&str>,
    ) -> Result<Post>;

    /// Rewrite the mutable columns of a post. `created_at` and `author_id`
    /// never change.
    async fn update(
        &self,
        id: Uuid,
        text: &str,
        group_id: Option<Uuid>,
        image_key: Option<&str>,
    ) -> Result<Post>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>>;

    /// All posts, paginated
    async fn recent(&self, limit: i64, offset: i64) -> Result<(Vec<Post>, i64)>;

    /// Posts authored by any user in the set, paginated
    async fn by_authors(
        &self,
        author_ids: &[Uuid],
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Post>, i64)>;

    /// One author's posts, paginated
    async fn by_author(&self, author_id: Uuid, limit: i64, offset: i64)
        -> Result<(Vec<Post>, i64)>;

    /// Posts filed under a group, paginated
    async fn by_group(&self, group_id: Uuid, limit: i64, offset: i64)
        -> Result<(Vec<Post>, i64)>;

    async fn count_by_author(&self, author_id: Uuid) -> Result<i64>;
}

/// Interface for the local user read-model (identity is owned by the
/// authentication service)
#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    /// Provision or refresh a mirror row from validated token claims
    async fn upsert(&self, id: Uuid, username: &str) -> Result<()>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;
}

/// Interface for the group directory
#[async_trait::async_trait]
pub trait GroupRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Group>>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>>;

    async fn exists(&self, id: Uuid) -> Result<bool>;
}

/// Interface for comment storage
#[async_trait::async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(&self, post_id: Uuid, author_id: Uuid, text: &str) -> Result<Comment>;

    /// A post's comments, oldest first
    async fn for_post(&self, post_id: Uuid) -> Result<Vec<Comment>>;
}
