mod comments;
mod follows;
mod groups;
mod posts;
mod r#trait;
mod users;

pub use comments::PostgresCommentRepository;
pub use follows::PostgresFollowRepository;
pub use groups::PostgresGroupRepository;
pub use posts::PostgresPostRepository;
pub use r#trait::{
    CommentRepository, FollowRepository, GroupRepository, PostRepository, UserRepository,
};
pub use users::PostgresUserRepository;
