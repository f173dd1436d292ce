//! Cache-then-refresh repositories.
//!
//! Every repository operation streams the cached value first and the value
//! fetched from the remote source second, writing the latter back to the
//! cache before it is emitted.

pub mod cache;
pub mod config;
pub mod jsonplaceholder;
pub mod output;
pub mod repository;
