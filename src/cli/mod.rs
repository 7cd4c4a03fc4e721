//! Command-line interface for Ignoro.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{AddArgs, Cli, Commands, CompletionsArgs, ListArgs};
pub use commands::{Command, CommandContext, CommandDispatcher, CommandResult};
