//! In-memory repository doubles and fixtures for integration tests.
//!
//! Everything runs without PostgreSQL or Redis: state lives in
//! `Arc<Mutex<...>>` collections shared across cloned handles, mirroring
//! the ordering and idempotence behavior of the SQL implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use scribe_service::domain::{Comment, Group, Post, User};
use scribe_service::error::{AppError, Result};
use scribe_service::middleware::Claims;
use scribe_service::repository::{
    CommentRepository, FollowRepository, GroupRepository, PostRepository, UserRepository,
};
use scribe_service::services::{
    CommentService, FeedService, FollowService, GroupService, PostService, UserService,
};
use scribe_service::AppState;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Mint a bearer token the way the authentication service does
pub fn auth_token(user_id: Uuid, username: &str) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        iat: now,
        exp: now + 3600,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("Failed to mint test token")
}

#[derive(Clone, Default)]
pub struct MemoryUserRepository {
    users: Arc<Mutex<Vec<User>>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user directly, returning its id
    pub fn seed(&self, username: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.users.lock().unwrap().push(User {
            id,
            username: username.to_string(),
            display_name: None,
            created_at: Utc::now(),
        });
        id
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn upsert(&self, id: Uuid, username: &str) -> Result<()> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.username = username.to_string();
        } else {
            users.push(User {
                id,
                username: username.to_string(),
                display_name: None,
                created_at: Utc::now(),
            });
        }
        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }
}

#[derive(Clone, Default)]
pub struct MemoryFollowRepository {
    edges: Arc<Mutex<Vec<(Uuid, Uuid)>>>,
}

impl MemoryFollowRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored edges, for uniqueness assertions
    pub fn edge_count(&self) -> usize {
        self.edges.lock().unwrap().len()
    }
}

#[async_trait]
impl FollowRepository for MemoryFollowRepository {
    async fn create_follow(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool> {
        let mut edges = self.edges.lock().unwrap();
        if edges
            .iter()
            .any(|&(a, b)| a == follower_id && b == followee_id)
        {
            return Ok(false);
        }
        edges.push((follower_id, followee_id));
        Ok(true)
    }

    async fn delete_follow(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool> {
        let mut edges = self.edges.lock().unwrap();
        let before = edges.len();
        edges.retain(|&(a, b)| !(a == follower_id && b == followee_id));
        Ok(edges.len() < before)
    }

    async fn is_following(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool> {
        Ok(self
            .edges
            .lock()
            .unwrap()
            .iter()
            .any(|&(a, b)| a == follower_id && b == followee_id))
    }

    async fn followees_of(&self, follower_id: Uuid) -> Result<Vec<Uuid>> {
        Ok(self
            .edges
            .lock()
            .unwrap()
            .iter()
            .filter(|&&(a, _)| a == follower_id)
            .map(|&(_, b)| b)
            .collect())
    }

    async fn follower_count(&self, user_id: Uuid) -> Result<i64> {
        Ok(self
            .edges
            .lock()
            .unwrap()
            .iter()
            .filter(|&&(_, b)| b == user_id)
            .count() as i64)
    }

    async fn following_count(&self, user_id: Uuid) -> Result<i64> {
        Ok(self
            .edges
            .lock()
            .unwrap()
            .iter()
            .filter(|&&(a, _)| a == user_id)
            .count() as i64)
    }
}

#[derive(Clone, Default)]
pub struct MemoryPostRepository {
    posts: Arc<Mutex<Vec<Post>>>,
}

impl MemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a post with an explicit timestamp, for ordering scenarios
    pub fn seed_at(&self, author_id: Uuid, text: &str, created_at: DateTime<Utc>) -> Post {
        let post = Post {
            id: Uuid::new_v4(),
            author_id,
            group_id: None,
            text: text.to_string(),
            image_key: None,
            created_at,
        };
        self.posts.lock().unwrap().push(post.clone());
        post
    }

    pub fn seed(&self, author_id: Uuid, text: &str) -> Post {
        self.seed_at(author_id, text, Utc::now())
    }

    // Newest first, id descending on timestamp ties, like the SQL ORDER BY.
    fn page_of(mut matching: Vec<Post>, limit: i64, offset: i64) -> (Vec<Post>, i64) {
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        let total = matching.len() as i64;
        let page = matching
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect();
        (page, total)
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn create(
        &self,
        author_id: Uuid,
        group_id: Option<Uuid>,
        text: &str,
        image_key: Option<&str>,
    ) -> Result<Post> {
        let post = Post {
            id: Uuid::new_v4(),
            author_id,
            group_id,
            text: text.to_string(),
            image_key: image_key.map(String::from),
            created_at: Utc::now(),
        };
        self.posts.lock().unwrap().push(post.clone());
        Ok(post)
    }

    async fn update(
        &self,
        id: Uuid,
        text: &str,
        group_id: Option<Uuid>,
        image_key: Option<&str>,
    ) -> Result<Post> {
        let mut posts = self.posts.lock().unwrap();
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound(format!("post {} not found", id)))?;
        post.text = text.to_string();
        post.group_id = group_id;
        post.image_key = image_key.map(String::from);
        Ok(post.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>> {
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn recent(&self, limit: i64, offset: i64) -> Result<(Vec<Post>, i64)> {
        let all = self.posts.lock().unwrap().clone();
        Ok(Self::page_of(all, limit, offset))
    }

    async fn by_authors(
        &self,
        author_ids: &[Uuid],
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Post>, i64)> {
        let matching = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| author_ids.contains(&p.author_id))
            .cloned()
            .collect();
        Ok(Self::page_of(matching, limit, offset))
    }

    async fn by_author(
        &self,
        author_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Post>, i64)> {
        let matching = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect();
        Ok(Self::page_of(matching, limit, offset))
    }

    async fn by_group(&self, group_id: Uuid, limit: i64, offset: i64) -> Result<(Vec<Post>, i64)> {
        let matching = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.group_id == Some(group_id))
            .cloned()
            .collect();
        Ok(Self::page_of(matching, limit, offset))
    }

    async fn count_by_author(&self, author_id: Uuid) -> Result<i64> {
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.author_id == author_id)
            .count() as i64)
    }
}

#[derive(Clone, Default)]
pub struct MemoryGroupRepository {
    groups: Arc<Mutex<Vec<Group>>>,
}

impl MemoryGroupRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, title: &str, slug: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.groups.lock().unwrap().push(Group {
            id,
            title: title.to_string(),
            slug: slug.to_string(),
            description: String::new(),
            created_at: Utc::now(),
        });
        id
    }
}

#[async_trait]
impl GroupRepository for MemoryGroupRepository {
    async fn list(&self) -> Result<Vec<Group>> {
        let mut groups = self.groups.lock().unwrap().clone();
        groups.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(groups)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>> {
        Ok(self
            .groups
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.slug == slug)
            .cloned())
    }

    async fn exists(&self, id: Uuid) -> Result<bool> {
        Ok(self.groups.lock().unwrap().iter().any(|g| g.id == id))
    }
}

#[derive(Clone, Default)]
pub struct MemoryCommentRepository {
    comments: Arc<Mutex<Vec<Comment>>>,
}

impl MemoryCommentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommentRepository for MemoryCommentRepository {
    async fn create(&self, post_id: Uuid, author_id: Uuid, text: &str) -> Result<Comment> {
        let comment = Comment {
            id: Uuid::new_v4(),
            post_id,
            author_id,
            text: text.to_string(),
            created_at: Utc::now(),
        };
        self.comments.lock().unwrap().push(comment.clone());
        Ok(comment)
    }

    async fn for_post(&self, post_id: Uuid) -> Result<Vec<Comment>> {
        let mut comments: Vec<Comment> = self
            .comments
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(comments)
    }
}

/// The doubles plus an `AppState` wired over them
pub struct TestHarness {
    pub users: MemoryUserRepository,
    pub posts: MemoryPostRepository,
    pub groups: MemoryGroupRepository,
    pub comments: MemoryCommentRepository,
    pub follows: MemoryFollowRepository,
    pub state: AppState,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_admin(false)
    }

    pub fn with_admin(admin_enabled: bool) -> Self {
        let users = MemoryUserRepository::new();
        let posts = MemoryPostRepository::new();
        let groups = MemoryGroupRepository::new();
        let comments = MemoryCommentRepository::new();
        let follows = MemoryFollowRepository::new();

        let users_repo: Arc<dyn UserRepository> = Arc::new(users.clone());
        let posts_repo: Arc<dyn PostRepository> = Arc::new(posts.clone());
        let groups_repo: Arc<dyn GroupRepository> = Arc::new(groups.clone());
        let comments_repo: Arc<dyn CommentRepository> = Arc::new(comments.clone());
        let follows_repo: Arc<dyn FollowRepository> = Arc::new(follows.clone());

        let state = AppState {
            users: UserService::new(
                users_repo.clone(),
                posts_repo.clone(),
                follows_repo.clone(),
            ),
            posts: PostService::new(posts_repo.clone(), groups_repo.clone(), users_repo.clone()),
            comments: CommentService::new(
                comments_repo.clone(),
                posts_repo.clone(),
                users_repo.clone(),
            ),
            follows: FollowService::new(users_repo.clone(), follows_repo.clone()),
            feed: FeedService::new(follows_repo.clone(), posts_repo.clone()),
            groups: GroupService::new(groups_repo),
            page_cache: None,
            admin_enabled,
        };

        Self {
            users,
            posts,
            groups,
            comments,
            follows,
            state,
        }
    }
}
