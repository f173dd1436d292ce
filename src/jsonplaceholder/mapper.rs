use crate::repository::Mapper;

use super::api_types::{PostEntity, UserEntity};
use super::types::{Post, User};

#[derive(Debug, Clone, Copy, Default)]
pub struct PostMapper;

impl Mapper for PostMapper {
  type Entity = PostEntity;
  type Domain = Post;

  fn map_to_domain(&self, entity: &PostEntity) -> Post {
    Post {
      id: entity.id,
      user_id: entity.user_id,
      title: entity.title.clone(),
      body: entity.body.clone(),
    }
  }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UserMapper;

impl Mapper for UserMapper {
  type Entity = UserEntity;
  type Domain = User;

  fn map_to_domain(&self, entity: &UserEntity) -> User {
    User {
      id: entity.id,
      name: entity.name.clone(),
      username: entity.username.clone(),
      email: entity.email.clone(),
      // Blank strings carry no information
      phone: entity.phone.clone().filter(|p| !p.trim().is_empty()),
      website: entity.website.clone().filter(|w| !w.trim().is_empty()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_map_post_list_keeps_order() {
    let entities = vec![
      PostEntity {
        user_id: 1,
        id: 2,
        title: "second".to_string(),
        body: String::new(),
      },
      PostEntity {
        user_id: 1,
        id: 1,
        title: "first".to_string(),
        body: String::new(),
      },
    ];

    let posts = PostMapper.map_list(&entities);
    let ids: Vec<u64> = posts.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![2, 1]);
    assert_eq!(posts[0].title, "second");
  }

  #[test]
  fn test_map_user_drops_blank_contact_fields() {
    let entity = UserEntity {
      id: 1,
      name: "Leanne Graham".to_string(),
      username: "Bret".to_string(),
      email: "Sincere@april.biz".to_string(),
      phone: Some("  ".to_string()),
      website: Some("hildegard.org".to_string()),
    };

    let user = UserMapper.map_to_domain(&entity);
    assert_eq!(user.phone, None);
    assert_eq!(user.website.as_deref(), Some("hildegard.org"));
    assert_eq!(user, UserMapper.map_to_domain(&entity));
  }
}
