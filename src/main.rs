use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::{eyre::eyre, Result};
use serde::{de::DeserializeOwned, Serialize};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use postcache::cache::{Cache, CacheError, MemoryCache, SqliteCache};
use postcache::config::{CacheBackend, CacheConfig, Config};
use postcache::jsonplaceholder::cache::{POST_LIST_KEY, USER_LIST_KEY};
use postcache::jsonplaceholder::{post_repository, user_repository, PostEntity, UserEntity};
use postcache::output::print_stream;

#[derive(Parser, Debug)]
#[command(name = "postcache")]
#[command(about = "Show cached resources, then refresh them from the API")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/postcache/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Write logs to this file instead of stderr
  #[arg(long)]
  log_file: Option<PathBuf>,

  /// Print one JSON object per emission
  #[arg(long)]
  json: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List all posts
  Posts,
  /// Show a single post
  Post { id: String },
  /// List all users
  Users,
  /// Show a single user
  User { id: String },
  /// Show where the cache lives and when each collection was last written
  Status,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();
  let _guard = init_tracing(args.log_file.as_deref())?;

  // Load configuration
  let config = Config::load(args.config.as_deref())?;
  info!(backend = ?config.cache.backend, base_url = %config.api.base_url, "Loaded configuration");

  let store = Store::open(&config.cache)?;
  run(&args, &config, &store).await
}

type SharedCache<T> = Arc<dyn Cache<T, Error = CacheError>>;

/// Cache backend selected by the configuration.
enum Store {
  Memory,
  Sqlite {
    path: PathBuf,
    cache: Arc<SqliteCache>,
  },
}

impl Store {
  fn open(config: &CacheConfig) -> Result<Self> {
    match config.backend {
      CacheBackend::Memory => Ok(Store::Memory),
      CacheBackend::Sqlite => {
        let path = match &config.path {
          Some(path) => path.clone(),
          None => SqliteCache::default_path()?,
        };
        let cache = Arc::new(SqliteCache::open_at(&path)?);
        Ok(Store::Sqlite { path, cache })
      }
    }
  }

  /// Cache handle for one resource collection.
  fn cache<T>(&self) -> SharedCache<T>
  where
    T: Clone + Serialize + DeserializeOwned + Send + 'static,
  {
    match self {
      Store::Memory => Arc::new(MemoryCache::<T>::new()) as SharedCache<T>,
      Store::Sqlite { cache, .. } => cache.clone() as SharedCache<T>,
    }
  }

  fn print_status(&self) -> Result<()> {
    let (path, cache) = match self {
      Store::Memory => {
        println!("Cache backend: memory (nothing is persisted)");
        return Ok(());
      }
      Store::Sqlite { path, cache } => (path, cache),
    };

    println!("Cache backend: sqlite ({})", path.display());
    for key in [POST_LIST_KEY, USER_LIST_KEY] {
      match cache.cached_at(key)? {
        Some(at) => println!("  {key}: written {}", at.format("%Y-%m-%d %H:%M:%S UTC")),
        None => println!("  {key}: never written"),
      }
    }
    Ok(())
  }
}

async fn run(args: &Args, config: &Config, store: &Store) -> Result<()> {
  let mut out = stdout().lock();

  match &args.command {
    Command::Posts => {
      let repo = post_repository(&config.api, store.cache::<Vec<PostEntity>>())?;
      print_stream(&mut out, repo.get_all(), args.json).await
    }
    Command::Post { id } => {
      let repo = post_repository(&config.api, store.cache::<Vec<PostEntity>>())?;
      print_stream(&mut out, repo.get_one(id), args.json).await
    }
    Command::Users => {
      let repo = user_repository(&config.api, store.cache::<Vec<UserEntity>>())?;
      print_stream(&mut out, repo.get_all(), args.json).await
    }
    Command::User { id } => {
      let repo = user_repository(&config.api, store.cache::<Vec<UserEntity>>())?;
      print_stream(&mut out, repo.get_one(id), args.json).await
    }
    Command::Status => store.print_status(),
  }
}

/// Install the global subscriber. Logs go to stderr unless a file is given,
/// so stdout carries only emissions.
fn init_tracing(log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("postcache=info"));

  match log_file {
    Some(path) => {
      let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
      let file_name = path
        .file_name()
        .ok_or_else(|| eyre!("Log file path has no file name: {}", path.display()))?;

      let appender = tracing_appender::rolling::never(dir, file_name);
      let (writer, guard) = tracing_appender::non_blocking(appender);
      tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

      Ok(Some(guard))
    }
    None => {
      tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

      Ok(None)
    }
  }
}
