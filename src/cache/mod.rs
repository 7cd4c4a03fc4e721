//! Local template cache.
//!
//! [`CacheStore`] owns the cache directory and delegates fetching to a
//! [`Synchronizer`](sync::Synchronizer) picked once per process.

pub mod store;
pub mod sync;

pub use store::{CacheStore, InitOutcome};
pub use sync::{select_synchronizer, Synchronizer, Transport};

use std::path::PathBuf;

/// Get the default cache directory: `~/.cache/ignoro`.
pub fn default_cache_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".cache")
        .join("ignoro")
}
