/// Business logic layer for scribe-service
///
/// - Follow service: follow-edge mutations and queries
/// - Feed service: personalized feed composition
/// - Post service: post creation, editing, listings
/// - Comment service: comments on posts
/// - Group service: group directory reads
/// - User service: profile composition over the user read-model
pub mod comments;
pub mod feed;
pub mod follow;
pub mod groups;
pub mod posts;
pub mod users;

pub use comments::CommentService;
pub use feed::FeedService;
pub use follow::FollowService;
pub use groups::GroupService;
pub use posts::PostService;
pub use users::{ProfileView, UserService};
