//! Add command implementation.
//!
//! Applies templates by name without the picker. Names are processed in
//! order within one session, so repeating a name reports it as already
//! applied instead of appending it twice.

use crate::cli::args::AddArgs;
use crate::error::{IgnoroError, Result};
use crate::session::describe_selection;
use crate::ui::{NoticeKind, Shell};

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The add command implementation.
pub struct AddCommand {
    args: AddArgs,
}

impl AddCommand {
    /// Create a new add command.
    pub fn new(args: AddArgs) -> Self {
        Self { args }
    }
}

impl Command for AddCommand {
    fn execute(&self, ctx: &mut CommandContext, shell: &mut dyn Shell) -> Result<CommandResult> {
        let session = ctx.scanned_session(shell)?;
        let mut failed = false;

        for name in &self.args.names {
            let Some(entry) = crate::catalog::find(session.catalog(), name).cloned() else {
                let err = IgnoroError::UnknownTemplate { name: name.clone() };
                shell.notify(&err.to_string(), NoticeKind::Error);
                failed = true;
                continue;
            };

            let result = session.select(&entry);
            failed |= result.is_err();
            let (message, kind) = describe_selection(entry.name(), &result);
            shell.notify(&message, kind);
        }

        Ok(if failed {
            CommandResult::failure(1)
        } else {
            CommandResult::success()
        })
    }
}
