//! Printing of repository emissions for the CLI.

use std::io::Write;

use color_eyre::Result;
use futures::StreamExt;
use serde::Serialize;

use crate::cache::CacheResult;
use crate::jsonplaceholder::{Post, User};
use crate::repository::{RefreshStream, RepositoryError};

/// Human-readable rendering of emitted data.
pub trait Render {
  fn render(&self) -> String;
}

impl Render for Post {
  fn render(&self) -> String {
    format!("#{} (user {}) {}", self.id, self.user_id, self.title)
  }
}

impl Render for User {
  fn render(&self) -> String {
    let mut line = format!("#{} {} (@{}) <{}>", self.id, self.name, self.username, self.email);
    if let Some(website) = &self.website {
      line.push_str(&format!(" {}", website));
    }
    line
  }
}

impl<T: Render> Render for Vec<T> {
  fn render(&self) -> String {
    let mut out = format!("{} item(s)", self.len());
    for item in self {
      out.push_str("\n  ");
      out.push_str(&item.render());
    }
    out
  }
}

impl<T: Render> Render for Option<T> {
  fn render(&self) -> String {
    match self {
      Some(item) => item.render(),
      None => "not cached".to_string(),
    }
  }
}

/// Write one emission as `[source] rendering`, or as a JSON line.
pub fn write_emission<T, W>(out: &mut W, emission: &CacheResult<T>, json: bool) -> Result<()>
where
  T: Render + Serialize,
  W: Write,
{
  if json {
    serde_json::to_writer(&mut *out, emission)?;
    writeln!(out)?;
  } else {
    writeln!(out, "[{}] {}", emission.source, emission.data.render())?;
  }
  Ok(())
}

/// Print every emission of `stream` as it arrives.
///
/// The cached emission is always printed before a failure is returned.
pub async fn print_stream<T, R, C, W>(
  out: &mut W,
  mut stream: RefreshStream<'_, T, R, C>,
  json: bool,
) -> Result<()>
where
  T: Render + Serialize,
  R: std::error::Error + Send + Sync + 'static,
  C: std::error::Error + Send + Sync + 'static,
  W: Write,
{
  while let Some(item) = stream.next().await {
    let emission = item?;
    write_emission(out, &emission, json)?;
    out.flush()?;
  }
  Ok(())
}
