//! Repository that serves cached data first, then refreshes it from the remote source.

use futures::stream::{self, BoxStream, StreamExt};
use thiserror::Error;
use tracing::{debug, info};

use crate::cache::{Cache, CacheResult, Resource};

use super::merge::merge_by_id;
use super::traits::{Mapper, RemoteSource};

/// Terminal failure of a repository stream.
///
/// Carries the collaborator's error unchanged so callers can inspect it.
/// Display and `source` are forwarded to the wrapped error.
#[derive(Error, Debug)]
pub enum RepositoryError<R, C> {
  /// The remote fetch failed; nothing was written to the cache
  #[error(transparent)]
  Remote(R),

  /// The remote fetch succeeded but writing it to the cache failed
  #[error(transparent)]
  CachePersist(C),
}

/// Stream produced by repository operations.
///
/// Yields the cached value first and the refreshed value second. A failure
/// ends the stream right after the cached value.
pub type RefreshStream<'a, T, R, C> = BoxStream<'a, Result<CacheResult<T>, RepositoryError<R, C>>>;

/// Cache-then-refresh repository for one resource type.
///
/// Every resource lives in a single collection entry of the cache. Single-item
/// refreshes are merged into that entry rather than stored under their own key.
pub struct CachedRepository<A, C, M> {
  api: A,
  cache: C,
  mapper: M,
}

impl<A, C, M> CachedRepository<A, C, M>
where
  A: RemoteSource,
  C: Cache<Vec<A::Entity>>,
  M: Mapper<Entity = A::Entity>,
{
  pub fn new(api: A, cache: C, mapper: M) -> Self {
    Self { api, cache, mapper }
  }

  /// The cache backing this repository.
  pub fn cache(&self) -> &C {
    &self.cache
  }

  /// Stream the cached collection, then the collection fetched from the remote source.
  ///
  /// On success the remote collection replaces the cached one wholesale.
  /// The remote call starts only once the cached emission has been consumed,
  /// so dropping the stream early skips the fetch and the cache write.
  pub fn get_all(&self) -> RefreshStream<'_, Vec<M::Domain>, A::Error, C::Error> {
    stream::once(self.cached_all())
      .chain(stream::once(self.refresh_all()))
      .boxed()
  }

  /// Stream the cached entity with `id`, then the entity fetched from the remote source.
  ///
  /// The cached emission is `None` when the collection holds no entity with
  /// `id`. On success the fetched entity is merged into the cached collection.
  pub fn get_one(&self, id: &str) -> RefreshStream<'_, Option<M::Domain>, A::Error, C::Error> {
    stream::once(self.cached_one(id.to_string()))
      .chain(stream::once(self.refresh_one(id.to_string())))
      .boxed()
  }

  fn key() -> &'static str {
    <A::Entity as Resource>::collection_key()
  }

  fn load_collection(&self) -> Vec<A::Entity> {
    self.cache.load(Self::key(), Vec::new())
  }

  async fn cached_all(
    &self,
  ) -> Result<CacheResult<Vec<M::Domain>>, RepositoryError<A::Error, C::Error>> {
    let entities = self.load_collection();
    debug!(
      key = Self::key(),
      count = entities.len(),
      "Emitting cached collection"
    );

    Ok(CacheResult::from_cache(self.mapper.map_list(&entities)))
  }

  async fn refresh_all(
    &self,
  ) -> Result<CacheResult<Vec<M::Domain>>, RepositoryError<A::Error, C::Error>> {
    let key = Self::key();
    debug!(key, "Fetching collection from remote");

    let entities = self.api.fetch_all().await.map_err(RepositoryError::Remote)?;
    let saved = self
      .cache
      .save(key, entities)
      .map_err(RepositoryError::CachePersist)?;
    info!(key, count = saved.len(), "Cached remote collection");

    Ok(CacheResult::from_network(self.mapper.map_list(&saved)))
  }

  async fn cached_one(
    &self,
    id: String,
  ) -> Result<CacheResult<Option<M::Domain>>, RepositoryError<A::Error, C::Error>> {
    let entities = self.load_collection();
    let found = entities.iter().find(|entity| entity.id() == id);
    debug!(
      key = Self::key(),
      id = %id,
      hit = found.is_some(),
      "Emitting cached entity"
    );

    Ok(CacheResult::from_cache(
      found.map(|entity| self.mapper.map_to_domain(entity)),
    ))
  }

  async fn refresh_one(
    &self,
    id: String,
  ) -> Result<CacheResult<Option<M::Domain>>, RepositoryError<A::Error, C::Error>> {
    let key = Self::key();
    debug!(key, id = %id, "Fetching entity from remote");

    let entity = self
      .api
      .fetch_by_id(&id)
      .await
      .map_err(RepositoryError::Remote)?;

    // Reload: the collection may have been replaced while the fetch was in flight.
    // Read-then-write, so a write landing between these two calls is lost.
    let merged = merge_by_id(self.load_collection(), entity.clone());
    self
      .cache
      .save(key, merged)
      .map_err(RepositoryError::CachePersist)?;
    info!(key, id = %id, "Merged remote entity into cached collection");

    Ok(CacheResult::from_network(Some(
      self.mapper.map_to_domain(&entity),
    )))
  }
}
