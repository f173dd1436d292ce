//! Core traits and types for the caching system.

use serde::{de::DeserializeOwned, Serialize};

/// Trait for entities that can be cached inside a resource collection.
///
/// Every resource type lives in exactly one collection entry, stored under
/// [`Resource::collection_key`]. Single-item refreshes are merged into that
/// same entry by [`Resource::id`].
pub trait Resource: Clone + Send + Sync + Serialize + DeserializeOwned {
  /// Unique identifier for this entity (e.g., post id)
  fn id(&self) -> String;

  /// Cache key of the collection holding every entity of this type (e.g., "Post List")
  fn collection_key() -> &'static str;
}

/// Key/value store used by the repositories.
///
/// `load` never fails: a miss (or an unreadable entry) yields `default`, and
/// implementations store that default so a second `load` of the same key is
/// consistent. `save` overwrites and hands the stored value back.
pub trait Cache<T>: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the value under `key`, materializing `default` on a miss.
  fn load(&self, key: &str, default: T) -> T;

  /// Store `value` under `key`, replacing any existing entry.
  fn save(&self, key: &str, value: T) -> Result<T, Self::Error>;
}

impl<T, C: Cache<T> + ?Sized> Cache<T> for std::sync::Arc<C> {
  type Error = C::Error;

  fn load(&self, key: &str, default: T) -> T {
    (**self).load(key, default)
  }

  fn save(&self, key: &str, value: T) -> Result<T, Self::Error> {
    (**self).save(key, value)
  }
}

/// A single emission of a repository stream, with metadata about its source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheResult<T> {
  /// The actual data
  pub data: T,
  /// Where the data came from
  pub source: CacheSource,
}

impl<T> CacheResult<T> {
  /// Create a new cache result from fresh network data.
  pub fn from_network(data: T) -> Self {
    Self {
      data,
      source: CacheSource::Network,
    }
  }

  /// Create a new cache result from cached data.
  pub fn from_cache(data: T) -> Self {
    Self {
      data,
      source: CacheSource::Cache,
    }
  }
}

/// Indicates where emitted data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheSource {
  /// Whatever the cache held when the request started (possibly the empty default)
  Cache,
  /// Fresh data from the remote source, already written back to the cache
  Network,
}

impl std::fmt::Display for CacheSource {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      CacheSource::Cache => write!(f, "cache"),
      CacheSource::Network => write!(f, "network"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_cache_result_sources() {
    let cached = CacheResult::from_cache(1);
    assert_eq!(cached.source, CacheSource::Cache);
    assert_eq!(cached.source.to_string(), "cache");

    let fresh = CacheResult::from_network(2);
    assert_eq!(fresh.source, CacheSource::Network);
    assert_eq!(fresh.source.to_string(), "network");
  }

  #[test]
  fn test_source_serializes_lowercase() {
    let json = serde_json::to_value(CacheResult::from_network(vec![1, 2])).unwrap();
    assert_eq!(json["source"], "network");
    assert_eq!(json["data"], serde_json::json!([1, 2]));
  }
}
