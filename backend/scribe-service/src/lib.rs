/// Scribe Service Library
///
/// A social-blogging backend: users author posts, organize them into
/// groups, comment on posts, and follow other authors to compose a
/// personalized feed.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and the route table
/// - `domain`: Data structures for users, groups, posts, comments, follows
/// - `services`: Business logic layer
/// - `repository`: Database access layer behind trait interfaces
/// - `cache`: Versioned page cache over Redis
/// - `middleware`: JWT viewer resolution
/// - `error`: Error types and handling
/// - `config`: Configuration management
/// - `metrics`: Observability counters and the exposition endpoint
pub mod cache;
pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod repository;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};

use cache::PageCache;
use services::{
    CommentService, FeedService, FollowService, GroupService, PostService, UserService,
};

/// Shared application state handed to every handler.
///
/// Services hold trait objects over the repositories, so tests can wire
/// this up with in-memory implementations and no running database.
#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub posts: PostService,
    pub comments: CommentService,
    pub follows: FollowService,
    pub feed: FeedService,
    pub groups: GroupService,
    /// Absent when no Redis URL is configured; listings then always hit
    /// the database.
    pub page_cache: Option<PageCache>,
    pub admin_enabled: bool,
}
