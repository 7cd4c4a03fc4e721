//! Ignoro - Interactive picker for `.gitignore` templates.
//!
//! Ignoro keeps a local copy of a gitignore template collection, lets the
//! user pick templates from a fuzzy list, and appends each chosen template
//! to the project's ignore file at most once per run.
//!
//! # Modules
//!
//! - [`apply`] - Appending a template to the target file
//! - [`cache`] - Local template cache and its synchronizers (git, archive)
//! - [`catalog`] - Scanning the cache for `*.gitignore` templates
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - User settings loading
//! - [`error`] - Error types and result aliases
//! - [`selection`] - Per-run record of applied templates
//! - [`session`] - The picker loop tying everything together
//! - [`ui`] - Interactive picker, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use ignoro::selection::{AppliedSet, MarkOutcome};
//!
//! let mut applied = AppliedSet::new();
//! assert_eq!(applied.try_mark("Go.gitignore"), MarkOutcome::Applied);
//! assert_eq!(applied.try_mark("Go.gitignore"), MarkOutcome::AlreadyApplied);
//! ```
//!
//! For end-to-end runs over a real cache, see the integration tests.

pub mod apply;
pub mod cache;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod selection;
pub mod session;
pub mod ui;

pub use error::{IgnoroError, Result};
