//! Caching implementations for JSONPlaceholder types.

use crate::cache::Resource;

use super::api_types::{PostEntity, UserEntity};

pub const POST_LIST_KEY: &str = "Post List";
pub const USER_LIST_KEY: &str = "User List";

impl Resource for PostEntity {
  fn id(&self) -> String {
    self.id.to_string()
  }

  fn collection_key() -> &'static str {
    POST_LIST_KEY
  }
}

impl Resource for UserEntity {
  fn id(&self) -> String {
    self.id.to_string()
  }

  fn collection_key() -> &'static str {
    USER_LIST_KEY
  }
}
