//! Error types for Ignoro operations.
//!
//! Each component owns a small error enum:
//!
//! - [`CacheError`] for populating and refreshing the template cache
//! - [`ScanError`] for walking the cache into a catalog
//! - [`ApplyError`] for appending a template to the target file
//!
//! [`IgnoroError`] unifies them for command-level code, together with a
//! [`Result`] alias.
//!
//! # Error Handling Strategy
//!
//! - `CacheError::InitFailed` at startup is fatal (exit code 1)
//! - Every other error is turned into a status message by the shell and the
//!   session keeps running with its previous state

use std::path::PathBuf;
use thiserror::Error;

/// Failures of the local template cache.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The cache location could not be populated from the remote source.
    #[error("Failed to initialize template cache at {}: {message}", .location.display())]
    InitFailed { location: PathBuf, message: String },

    /// Pulling the latest templates into an existing cache failed.
    #[error("Failed to update templates in {}: {message}", .location.display())]
    RefreshFailed { location: PathBuf, message: String },
}

/// Failures while scanning the cache into a catalog.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The cache root itself could not be read.
    #[error("Cannot read template directory {}: {source}", .root.display())]
    RootUnreadable {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures while appending a template to the target file.
#[derive(Debug, Error)]
pub enum ApplyError {
    /// The template file is missing or unreadable.
    #[error("Cannot read template {}: {source}", .path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Opening, writing, or syncing the target file failed.
    #[error("Failed to write {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Top-level error type for Ignoro commands.
#[derive(Debug, Error)]
pub enum IgnoroError {
    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Apply(#[from] ApplyError),

    /// Settings file missing or malformed.
    #[error("Invalid configuration at {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    /// The user asked for a template the catalog does not contain.
    #[error("Unknown template: {name}")]
    UnknownTemplate { name: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Ignoro operations.
pub type Result<T> = std::result::Result<T, IgnoroError>;
