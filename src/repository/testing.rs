//! Deterministic stand-ins for repository collaborators.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

use crate::cache::{Cache, CacheError, MemoryCache, Resource};

use super::traits::RemoteSource;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("stub remote failure: {0}")]
pub struct StubError(pub &'static str);

type Hook = Box<dyn Fn() + Send + Sync>;

/// Remote source returning canned results and recording its calls.
pub struct StubRemote<E> {
  all: Result<Vec<E>, StubError>,
  one: Result<E, StubError>,
  hook: Option<Hook>,
  fetch_all_calls: AtomicUsize,
  requested_ids: Mutex<Vec<String>>,
}

impl<E: Resource> StubRemote<E> {
  pub fn new() -> Self {
    Self {
      all: Ok(Vec::new()),
      one: Err(StubError("not found")),
      hook: None,
      fetch_all_calls: AtomicUsize::new(0),
      requested_ids: Mutex::new(Vec::new()),
    }
  }

  pub fn with_all(mut self, all: Result<Vec<E>, StubError>) -> Self {
    self.all = all;
    self
  }

  pub fn with_one(mut self, one: Result<E, StubError>) -> Self {
    self.one = one;
    self
  }

  /// Run `hook` inside every fetch, before the result is returned.
  pub fn with_hook(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
    self.hook = Some(Box::new(hook));
    self
  }

  pub fn fetch_all_calls(&self) -> usize {
    self.fetch_all_calls.load(Ordering::SeqCst)
  }

  pub fn requested_ids(&self) -> Vec<String> {
    self.requested_ids.lock().unwrap().clone()
  }

  fn run_hook(&self) {
    if let Some(hook) = &self.hook {
      hook();
    }
  }
}

#[async_trait]
impl<E: Resource> RemoteSource for StubRemote<E> {
  type Entity = E;
  type Error = StubError;

  async fn fetch_all(&self) -> Result<Vec<E>, StubError> {
    self.fetch_all_calls.fetch_add(1, Ordering::SeqCst);
    self.run_hook();
    self.all.clone()
  }

  async fn fetch_by_id(&self, id: &str) -> Result<E, StubError> {
    self.requested_ids.lock().unwrap().push(id.to_string());
    self.run_hook();
    self.one.clone()
  }
}

/// Memory cache that counts calls and can be told to reject writes.
pub struct SpyCache<T> {
  inner: MemoryCache<T>,
  loads: AtomicUsize,
  saves: AtomicUsize,
  fail_saves: AtomicBool,
}

impl<T: Clone + Send> SpyCache<T> {
  pub fn new() -> Self {
    Self {
      inner: MemoryCache::new(),
      loads: AtomicUsize::new(0),
      saves: AtomicUsize::new(0),
      fail_saves: AtomicBool::new(false),
    }
  }

  /// Write directly, bypassing the counters.
  pub fn seed(&self, key: &str, value: T) {
    self.inner.save(key, value).unwrap();
  }

  /// Current value under `key` without materializing a default.
  pub fn peek(&self, key: &str) -> Option<T> {
    self.inner.get(key)
  }

  pub fn fail_saves(&self) {
    self.fail_saves.store(true, Ordering::SeqCst);
  }

  pub fn loads(&self) -> usize {
    self.loads.load(Ordering::SeqCst)
  }

  /// Number of attempted saves, failed ones included.
  pub fn saves(&self) -> usize {
    self.saves.load(Ordering::SeqCst)
  }
}

impl<T: Clone + Send> Cache<T> for SpyCache<T> {
  type Error = CacheError;

  fn load(&self, key: &str, default: T) -> T {
    self.loads.fetch_add(1, Ordering::SeqCst);
    self.inner.load(key, default)
  }

  fn save(&self, key: &str, value: T) -> Result<T, CacheError> {
    self.saves.fetch_add(1, Ordering::SeqCst);
    if self.fail_saves.load(Ordering::SeqCst) {
      return Err(CacheError::Io(std::io::Error::other("disk full")));
    }
    self.inner.save(key, value)
  }
}
