//! Serde types matching JSONPlaceholder API responses.
//!
//! These are also the shapes stored in the cache. Domain types live in
//! `types.rs` and are produced by the mappers.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostEntity {
  pub user_id: u64,
  pub id: u64,
  #[serde(default)]
  pub title: String,
  #[serde(default)]
  pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEntity {
  pub id: u64,
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub username: String,
  #[serde(default)]
  pub email: String,
  pub phone: Option<String>,
  pub website: Option<String>,
  // Address and company are not used
}
