//! Key/value caches backing the repositories.
//!
//! This module is resource-agnostic:
//! - `Cache<T>` is the load/save capability the repositories consume
//! - `MemoryCache` keeps values in process memory
//! - `SqliteCache` persists values as JSON in a local database

mod error;
mod memory;
mod storage;
mod traits;

pub use error::CacheError;
pub use memory::MemoryCache;
pub use storage::SqliteCache;
pub use traits::{Cache, CacheResult, CacheSource, Resource};
