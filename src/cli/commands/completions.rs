//! Shell completions generation.
//!
//! The `ignoro completions` command generates shell completion scripts.

use std::io::Write;

use crate::cli::args::{Cli, CompletionsArgs};
use crate::error::Result;
use crate::ui::Shell;
use clap::CommandFactory;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The completions command implementation.
pub struct CompletionsCommand {
    args: CompletionsArgs,
}

impl CompletionsCommand {
    /// Create a new completions command.
    pub fn new(args: CompletionsArgs) -> Self {
        Self { args }
    }
}

impl Command for CompletionsCommand {
    fn execute(&self, _ctx: &mut CommandContext, _shell: &mut dyn Shell) -> Result<CommandResult> {
        let mut stdout = std::io::stdout().lock();
        self.write_to(&mut stdout);
        stdout.flush()?;
        Ok(CommandResult::success())
    }
}

impl CompletionsCommand {
    /// Write the completion script for the requested shell.
    pub fn write_to(&self, out: &mut dyn Write) {
        let mut cmd = Cli::command();
        clap_complete::generate(self.args.shell, &mut cmd, "ignoro", out);
    }
}
