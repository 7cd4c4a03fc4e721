//! Interactive picker command (the default when no subcommand is given).

use crate::error::Result;
use crate::session::run;
use crate::ui::{NoticeKind, Shell};

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The picker command implementation.
pub struct PickCommand {
    attended: bool,
}

impl PickCommand {
    /// Create the command. `attended` says whether a user is at the terminal.
    pub fn new(attended: bool) -> Self {
        Self { attended }
    }
}

impl Command for PickCommand {
    fn execute(&self, ctx: &mut CommandContext, shell: &mut dyn Shell) -> Result<CommandResult> {
        if !self.attended {
            shell.notify(
                "The template picker needs an interactive terminal; use `ignoro list` and `ignoro add <NAME>` instead",
                NoticeKind::Error,
            );
            return Ok(CommandResult::failure(1));
        }

        ctx.session(shell)?;
        // An unscannable cache leaves the picker empty; refresh can recover.
        if let Some(e) = ctx.take_scan_error() {
            shell.notify(&e.to_string(), NoticeKind::Error);
        }
        run(ctx.session(shell)?, shell)?;
        Ok(CommandResult::success())
    }
}
