//! Collaborator traits consumed by [`CachedRepository`](super::CachedRepository).

use async_trait::async_trait;

use crate::cache::Resource;

/// Authoritative source of entities, usually a remote API.
///
/// Each call yields a single value or an error.
#[async_trait]
pub trait RemoteSource: Send + Sync {
  type Entity: Resource;
  type Error: std::error::Error + Send + Sync + 'static;

  /// Fetch the whole collection, in the order the source returns it.
  async fn fetch_all(&self) -> Result<Vec<Self::Entity>, Self::Error>;

  /// Fetch a single entity by id.
  async fn fetch_by_id(&self, id: &str) -> Result<Self::Entity, Self::Error>;
}

/// Pure translation from the stored/transport shape to the domain shape.
///
/// Must be deterministic: the same entity always maps to the same domain value.
pub trait Mapper: Send + Sync {
  type Entity;
  type Domain: Send;

  fn map_to_domain(&self, entity: &Self::Entity) -> Self::Domain;

  fn map_list(&self, entities: &[Self::Entity]) -> Vec<Self::Domain> {
    entities.iter().map(|e| self.map_to_domain(e)).collect()
  }
}
