//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait and is routed by
//! [`CommandDispatcher`]. Commands that need templates ask the shared
//! [`CommandContext`] for the session, which initializes the cache on
//! first use.

pub mod add;
pub mod completions;
pub mod dispatcher;
pub mod list;
pub mod pick;
pub mod update;

pub use dispatcher::{Command, CommandContext, CommandDispatcher, CommandResult};
