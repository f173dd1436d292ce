//! Cache-then-refresh repositories.
//!
//! A repository emits the cached value for a resource, fetches the
//! authoritative value from a [`RemoteSource`], writes it back to the
//! [`Cache`](crate::cache::Cache) and emits it again.

mod cached;
mod merge;
mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use cached::{CachedRepository, RefreshStream, RepositoryError};
pub use merge::merge_by_id;
pub use traits::{Mapper, RemoteSource};
