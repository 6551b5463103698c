pub mod models;

pub use models::{Comment, Follow, Group, Post, User};
