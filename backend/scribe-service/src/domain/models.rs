use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity - local mirror of an identity record owned by the
/// authentication service, keyed by its UUID and unique username
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Group entity - named category a post can belong to
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Group {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Post entity - authored text, optionally filed under a group.
/// `created_at` is immutable once set and serves as the sort key.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub group_id: Option<Uuid>,
    pub text: String,
    pub image_key: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Comment entity - represents a comment on a post
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Follow edge - directed relation granting the follower visibility of
/// the followee's posts. The (follower_id, followee_id) pair is unique
/// and never self-referential.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Follow {
    pub id: Uuid,
    pub follower_id: Uuid,
    pub followee_id: Uuid,
    pub created_at: DateTime<Utc>,
}
