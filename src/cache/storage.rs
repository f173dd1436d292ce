//! SQLite cache backend.

use chrono::{DateTime, Utc};
use color_eyre::{eyre::eyre, Result};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

use super::error::CacheError;
use super::traits::Cache;

/// SQLite-based cache storing each value as a JSON blob.
pub struct SqliteCache {
  conn: Mutex<Connection>,
}

impl SqliteCache {
  /// Create a new SQLite cache at the default location.
  pub fn open() -> Result<Self> {
    let path = Self::default_path()?;
    Self::open_at(&path)
  }

  /// Create a new SQLite cache at an explicit path.
  pub fn open_at(path: &Path) -> Result<Self> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)
        .map_err(|e| eyre!("Failed to create cache directory: {}", e))?;
    }

    let conn = Connection::open(path)
      .map_err(|e| eyre!("Failed to open cache database at {}: {}", path.display(), e))?;

    Self::with_connection(conn)
  }

  /// Create a cache that lives only as long as this value.
  pub fn in_memory() -> Result<Self> {
    let conn = Connection::open_in_memory()
      .map_err(|e| eyre!("Failed to open in-memory cache database: {}", e))?;

    Self::with_connection(conn)
  }

  fn with_connection(conn: Connection) -> Result<Self> {
    let cache = Self {
      conn: Mutex::new(conn),
    };
    cache.run_migrations()?;

    Ok(cache)
  }

  /// Get the default database path.
  pub fn default_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
      .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
      .ok_or_else(|| eyre!("Could not determine data directory"))?;

    Ok(data_dir.join("postcache").join("cache.db"))
  }

  /// Run database migrations for cache tables.
  fn run_migrations(&self) -> Result<()> {
    let conn = self
      .conn
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    conn
      .execute_batch(CACHE_SCHEMA)
      .map_err(|e| eyre!("Failed to run cache migrations: {}", e))?;

    Ok(())
  }

  /// When the entry under `key` was last written, if it exists.
  pub fn cached_at(&self, key: &str) -> Result<Option<DateTime<Utc>>, CacheError> {
    let conn = self.conn.lock().map_err(|_| CacheError::LockPoisoned)?;

    let cached_at: Option<String> = conn
      .query_row(
        "SELECT cached_at FROM cache_entries WHERE key = ?",
        params![key],
        |row| row.get(0),
      )
      .optional()?;

    Ok(cached_at.as_deref().and_then(parse_datetime))
  }

  fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
    let conn = self.conn.lock().map_err(|_| CacheError::LockPoisoned)?;

    let data: Option<Vec<u8>> = conn
      .query_row(
        "SELECT data FROM cache_entries WHERE key = ?",
        params![key],
        |row| row.get(0),
      )
      .optional()?;

    match data {
      Some(data) => Ok(Some(serde_json::from_slice(&data)?)),
      None => Ok(None),
    }
  }

  fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
    let data = serde_json::to_vec(value)?;
    let conn = self.conn.lock().map_err(|_| CacheError::LockPoisoned)?;

    conn.execute(
      "INSERT OR REPLACE INTO cache_entries (key, data, cached_at)
       VALUES (?, ?, datetime('now'))",
      params![key, data],
    )?;

    Ok(())
  }
}

/// Schema for cache tables.
const CACHE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS cache_entries (
    key TEXT PRIMARY KEY,
    data BLOB NOT NULL,
    cached_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;

impl<T> Cache<T> for SqliteCache
where
  T: Serialize + DeserializeOwned + Send,
{
  type Error = CacheError;

  fn load(&self, key: &str, default: T) -> T {
    match self.read(key) {
      Ok(Some(value)) => {
        debug!(key, "Cache hit");
        value
      }
      Ok(None) => {
        debug!(key, "Cache miss, storing default");
        if let Err(e) = self.write(key, &default) {
          warn!(key, error = %e, "Failed to store default cache entry");
        }
        default
      }
      Err(e) => {
        // Unreadable entries are left in place; the next save replaces them
        warn!(key, error = %e, "Failed to read cache entry, using default");
        default
      }
    }
  }

  fn save(&self, key: &str, value: T) -> Result<T, CacheError> {
    self.write(key, &value)?;
    Ok(value)
  }
}

/// Parse a datetime string from SQLite format.
fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
  // SQLite stores as "YYYY-MM-DD HH:MM:SS"
  chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
    .map(|dt| dt.and_utc())
    .map_err(|e| warn!("Failed to parse datetime '{}': {}", s, e))
    .ok()
}
