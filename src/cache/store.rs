//! Cache location lifecycle.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::CacheError;

use super::sync::{Synchronizer, Transport};

/// What [`CacheStore::ensure_initialized`] had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// The cache already existed; nothing was fetched.
    AlreadyPresent,
    /// The cache was fetched from the remote source.
    Populated,
}

/// Owns the on-disk template cache and the transport that fills it.
pub struct CacheStore {
    location: PathBuf,
    synchronizer: Box<dyn Synchronizer>,
}

impl CacheStore {
    /// Create a store for `location` using `synchronizer`.
    pub fn new(location: impl Into<PathBuf>, synchronizer: Box<dyn Synchronizer>) -> Self {
        Self {
            location: location.into(),
            synchronizer,
        }
    }

    /// Cache root directory.
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Transport in use.
    pub fn transport(&self) -> Transport {
        self.synchronizer.transport()
    }

    /// Populate the cache if it does not exist yet.
    ///
    /// On failure the partially created location is removed so the next
    /// run starts from scratch.
    pub fn ensure_initialized(&self) -> Result<InitOutcome, CacheError> {
        match fs::symlink_metadata(&self.location) {
            Ok(_) => return Ok(InitOutcome::AlreadyPresent),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(self.init_failed(e.to_string())),
        }

        tracing::info!(
            "Initializing template cache at {} via {}",
            self.location.display(),
            self.transport()
        );

        if let Err(e) = self.synchronizer.populate(&self.location) {
            self.discard_partial();
            return Err(self.init_failed(format!("{:#}", e)));
        }

        Ok(InitOutcome::Populated)
    }

    /// Pull the latest templates into the existing cache.
    ///
    /// A failed refresh is reported; the transport is responsible for
    /// leaving the previous contents usable.
    pub fn refresh(&self) -> Result<(), CacheError> {
        if !self.location.is_dir() {
            return Err(CacheError::RefreshFailed {
                location: self.location.clone(),
                message: "template cache does not exist".to_string(),
            });
        }

        self.synchronizer
            .update(&self.location)
            .map_err(|e| CacheError::RefreshFailed {
                location: self.location.clone(),
                message: format!("{:#}", e),
            })?;

        tracing::info!("Template cache at {} is up to date", self.location.display());
        Ok(())
    }

    fn discard_partial(&self) {
        match fs::remove_dir_all(&self.location) {
            Ok(()) => tracing::debug!("Removed partial cache {}", self.location.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                "Failed to remove partial cache {}: {}",
                self.location.display(),
                e
            ),
        }
    }

    fn init_failed(&self, message: String) -> CacheError {
        CacheError::InitFailed {
            location: self.location.clone(),
            message,
        }
    }
}
