//! Post and user repositories wired to the HTTP API.

use crate::cache::Cache;
use crate::config::ApiConfig;
use crate::repository::CachedRepository;

use super::api_types::{PostEntity, UserEntity};
use super::client::{ApiError, HttpRemote};
use super::mapper::{PostMapper, UserMapper};

pub type PostRepository<C> = CachedRepository<HttpRemote<PostEntity>, C, PostMapper>;
pub type UserRepository<C> = CachedRepository<HttpRemote<UserEntity>, C, UserMapper>;

/// Create a post repository over `GET {base}/posts`.
pub fn post_repository<C>(config: &ApiConfig, cache: C) -> Result<PostRepository<C>, ApiError>
where
  C: Cache<Vec<PostEntity>>,
{
  let api = HttpRemote::new(config, "posts")?;
  Ok(CachedRepository::new(api, cache, PostMapper))
}

/// Create a user repository over `GET {base}/users`.
pub fn user_repository<C>(config: &ApiConfig, cache: C) -> Result<UserRepository<C>, ApiError>
where
  C: Cache<Vec<UserEntity>>,
{
  let api = HttpRemote::new(config, "users")?;
  Ok(CachedRepository::new(api, cache, UserMapper))
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use futures::StreamExt;

  use crate::cache::{CacheResult, MemoryCache, SqliteCache};
  use crate::jsonplaceholder::cache::POST_LIST_KEY;
  use crate::repository::testing::{SpyCache, StubError, StubRemote};
  use crate::repository::{Mapper, RepositoryError};

  use super::*;

  fn create_post_entity() -> PostEntity {
    PostEntity {
      user_id: 1,
      id: 1,
      title: "title".to_string(),
      body: "body".to_string(),
    }
  }

  fn titled(title: &str) -> PostEntity {
    PostEntity {
      title: title.to_string(),
      ..create_post_entity()
    }
  }

  type StubPostRepository =
    CachedRepository<StubRemote<PostEntity>, Arc<SpyCache<Vec<PostEntity>>>, PostMapper>;

  fn repository(remote: StubRemote<PostEntity>, cached: Vec<PostEntity>) -> StubPostRepository {
    let cache = Arc::new(SpyCache::new());
    cache.seed(POST_LIST_KEY, cached);
    CachedRepository::new(remote, cache, PostMapper)
  }

  #[tokio::test]
  async fn test_get_posts_success() {
    let cache_list = vec![titled("cache")];
    let remote_list = vec![titled("remote")];
    let repo = repository(
      StubRemote::new().with_all(Ok(remote_list.clone())),
      cache_list.clone(),
    );

    let items: Vec<_> = repo.get_all().collect().await;

    let values: Vec<_> = items.into_iter().map(|item| item.unwrap()).collect();
    assert_eq!(
      values,
      vec![
        CacheResult::from_cache(PostMapper.map_list(&cache_list)),
        CacheResult::from_network(PostMapper.map_list(&remote_list)),
      ]
    );
    assert_eq!(repo.cache().peek(POST_LIST_KEY), Some(remote_list));
  }

  #[tokio::test]
  async fn test_get_posts_fail() {
    let repo = repository(
      StubRemote::new().with_all(Err(StubError("offline"))),
      Vec::new(),
    );

    let mut stream = repo.get_all();
    let first = stream.next().await.unwrap().unwrap();
    assert_eq!(first, CacheResult::from_cache(Vec::new()));

    let second = stream.next().await.unwrap();
    assert!(matches!(
      second,
      Err(RepositoryError::Remote(StubError("offline")))
    ));
    assert!(stream.next().await.is_none());
    assert_eq!(repo.cache().saves(), 0);
  }

  #[tokio::test]
  async fn test_get_post_success() {
    let cache_item = titled("cache");
    let remote_item = titled("remote");
    let repo = repository(
      StubRemote::new().with_one(Ok(remote_item.clone())),
      vec![cache_item.clone()],
    );

    let items: Vec<_> = repo.get_one("1").collect().await;

    let values: Vec<_> = items.into_iter().map(|item| item.unwrap()).collect();
    assert_eq!(
      values,
      vec![
        CacheResult::from_cache(Some(PostMapper.map_to_domain(&cache_item))),
        CacheResult::from_network(Some(PostMapper.map_to_domain(&remote_item))),
      ]
    );
    assert_eq!(repo.cache().loads(), 2);
    assert_eq!(repo.cache().peek(POST_LIST_KEY), Some(vec![remote_item]));
  }

  #[tokio::test]
  async fn test_get_post_fail() {
    let cache_item = titled("cache");
    let repo = repository(
      StubRemote::new().with_one(Err(StubError("boom"))),
      vec![cache_item.clone()],
    );

    let items: Vec<_> = repo.get_one("1").collect().await;

    assert_eq!(items.len(), 2);
    assert_eq!(
      items[0].as_ref().unwrap(),
      &CacheResult::from_cache(Some(PostMapper.map_to_domain(&cache_item)))
    );
    assert!(items[1].is_err());
    assert_eq!(repo.cache().loads(), 1);
    assert_eq!(repo.cache().saves(), 0);
    assert_eq!(repo.cache().peek(POST_LIST_KEY), Some(vec![cache_item]));
  }

  #[tokio::test]
  async fn test_sqlite_cache_round_trip_through_repository() {
    let cache = Arc::new(SqliteCache::in_memory().unwrap());
    let remote = StubRemote::new().with_all(Ok(vec![titled("remote")]));
    let repo = CachedRepository::new(remote, cache.clone(), PostMapper);

    let items: Vec<_> = repo.get_all().collect().await;
    assert!(items.iter().all(|item| item.is_ok()));

    let stored: Vec<PostEntity> = cache.load(POST_LIST_KEY, Vec::new());
    assert_eq!(stored, vec![titled("remote")]);
    assert!(cache.cached_at(POST_LIST_KEY).unwrap().is_some());
  }

  #[test]
  fn test_repositories_build_from_config() {
    let config = ApiConfig::default();
    assert!(post_repository(&config, MemoryCache::<Vec<PostEntity>>::new()).is_ok());
    assert!(user_repository(&config, MemoryCache::<Vec<UserEntity>>::new()).is_ok());

    let bad = ApiConfig {
      base_url: "nope".to_string(),
      ..ApiConfig::default()
    };
    assert!(matches!(
      post_repository(&bad, MemoryCache::<Vec<PostEntity>>::new()),
      Err(ApiError::Url(_))
    ));
  }
}
