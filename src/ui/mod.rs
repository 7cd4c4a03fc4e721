//! Interactive user interface components.
//!
//! This module provides:
//! - [`Shell`] trait, the seam between the picker and the core session
//! - [`TerminalShell`] for interactive terminal usage
//! - [`MockShell`] for scripted tests
//! - Theme and spinner helpers
//!
//! # Example
//!
//! ```
//! use ignoro::ui::{MockShell, NoticeKind, Shell, ShellAction};
//!
//! let mut shell = MockShell::new(vec![ShellAction::Quit]);
//! shell.notify("Use template Go.gitignore", NoticeKind::Info);
//! assert!(shell.has_info("Go.gitignore"));
//! ```

pub mod mock;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::{MockShell, MockSpinner};
pub use spinner::ProgressSpinner;
pub use terminal::TerminalShell;
pub use theme::{should_use_colors, Theme};

use crate::catalog::TemplateEntry;
use crate::error::Result;
use crate::selection::AppliedSet;

/// What the user asked for next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellAction {
    /// Apply this template to the target file.
    Select(TemplateEntry),
    /// Pull the latest templates and rescan.
    Refresh,
    /// Leave the picker.
    Quit,
}

/// Severity of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Presentation layer driving a [`Session`](crate::session::Session).
///
/// This trait allows mocking the picker in tests.
pub trait Shell {
    /// Show the catalog and wait for the next user action.
    fn next_action(
        &mut self,
        catalog: &[TemplateEntry],
        applied: &AppliedSet,
    ) -> Result<ShellAction>;

    /// Show a status message.
    fn notify(&mut self, message: &str, kind: NoticeKind);

    /// Start a busy indicator for a blocking operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Update the spinner message.
    fn set_message(&mut self, msg: &str);

    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);
}
