//! JSONPlaceholder-style REST resources: posts and users.

pub mod api_types;
pub mod cache;
pub mod client;
pub mod mapper;
pub mod repositories;
pub mod types;

pub use api_types::{PostEntity, UserEntity};
pub use client::{ApiError, HttpRemote};
pub use mapper::{PostMapper, UserMapper};
pub use repositories::{post_repository, user_repository, PostRepository, UserRepository};
pub use types::{Post, User};
