use serde::Serialize;

/// A post as shown to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
  pub id: u64,
  pub user_id: u64,
  pub title: String,
  pub body: String,
}

/// A user as shown to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
  pub id: u64,
  pub name: String,
  pub username: String,
  pub email: String,
  pub phone: Option<String>,
  pub website: Option<String>,
}
