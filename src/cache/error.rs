use thiserror::Error;

/// Failures of the bundled cache backends.
///
/// Only `save` surfaces these; reads fall back to the caller's default.
#[derive(Error, Debug)]
pub enum CacheError {
  #[error("SQLite error: {0}")]
  Sqlite(#[from] rusqlite::Error),

  #[error("JSON serialization error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),

  #[error("Cache lock poisoned")]
  LockPoisoned,
}
