//! Update command implementation.

use crate::error::Result;
use crate::ui::{NoticeKind, Shell};

use super::dispatcher::{Command, CommandContext, CommandResult};

/// Pulls the newest templates and reports the catalog size.
pub struct UpdateCommand;

impl Command for UpdateCommand {
    fn execute(&self, ctx: &mut CommandContext, shell: &mut dyn Shell) -> Result<CommandResult> {
        ctx.session(shell)?;
        // The refresh below rescans, so a failed startup scan is superseded.
        let startup_scan = ctx.take_scan_error();
        let fresh = ctx.freshly_populated() && startup_scan.is_none();
        let session = ctx.session(shell)?;

        if fresh {
            // Just fetched; another round trip would bring nothing new.
            let count = session.catalog().len();
            shell.notify(
                &format!("Templates updated ({count} available)"),
                NoticeKind::Info,
            );
            return Ok(CommandResult::success());
        }

        let mut spinner = shell.start_spinner("Pull newest templates");
        match session.refresh() {
            Ok(count) => {
                spinner.finish_success(&format!("Templates updated ({count} available)"));
                Ok(CommandResult::success())
            }
            Err(e) => {
                spinner.finish_error("Update failed");
                shell.notify(&e.to_string(), NoticeKind::Error);
                Ok(CommandResult::failure(1))
            }
        }
    }
}
