//! In-memory cache backend.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use tracing::debug;

use super::error::CacheError;
use super::traits::Cache;

/// Thread-safe in-memory cache holding values of a single type.
///
/// Nothing is ever evicted. Used by tests and by the `memory` backend when
/// persistence across runs is not wanted.
#[derive(Debug)]
pub struct MemoryCache<T> {
  entries: Mutex<HashMap<String, T>>,
}

impl<T> MemoryCache<T> {
  pub fn new() -> Self {
    Self {
      entries: Mutex::new(HashMap::new()),
    }
  }

  /// Current value under `key`, without storing anything on a miss.
  pub fn get(&self, key: &str) -> Option<T>
  where
    T: Clone,
  {
    self
      .entries
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .get(key)
      .cloned()
  }

  /// Number of stored entries.
  pub fn len(&self) -> usize {
    self
      .entries
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl<T> Default for MemoryCache<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T: Clone + Send> Cache<T> for MemoryCache<T> {
  type Error = CacheError;

  fn load(&self, key: &str, default: T) -> T {
    // A poisoned map still holds consistent entries; each write is a single insert
    let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

    entries
      .entry(key.to_string())
      .or_insert_with(|| {
        debug!(key, "Cache miss, storing default");
        default
      })
      .clone()
  }

  fn save(&self, key: &str, value: T) -> Result<T, CacheError> {
    let mut entries = self.entries.lock().map_err(|_| CacheError::LockPoisoned)?;
    entries.insert(key.to_string(), value.clone());
    Ok(value)
  }
}
