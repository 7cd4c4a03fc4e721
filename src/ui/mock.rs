//! Mock shell implementation for testing.
//!
//! `MockShell` replays a fixed list of actions and captures every notice
//! and spinner for later assertion.

use std::collections::VecDeque;

use crate::catalog::TemplateEntry;
use crate::error::Result;
use crate::selection::AppliedSet;

use super::{NoticeKind, Shell, ShellAction, SpinnerHandle};

/// Scripted [`Shell`].
///
/// Once the script is exhausted every further call returns
/// [`ShellAction::Quit`].
#[derive(Debug, Default)]
pub struct MockShell {
    actions: VecDeque<ShellAction>,
    infos: Vec<String>,
    errors: Vec<String>,
    spinners: Vec<String>,
    catalog_sizes: Vec<usize>,
}

impl MockShell {
    /// Create a shell that will perform `actions` in order.
    pub fn new(actions: Vec<ShellAction>) -> Self {
        Self {
            actions: actions.into(),
            ..Default::default()
        }
    }

    /// Get all captured informational notices.
    pub fn infos(&self) -> &[String] {
        &self.infos
    }

    /// Get all captured error notices.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all spinner messages that were started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Catalog length seen at each `next_action` call.
    pub fn catalog_sizes(&self) -> &[usize] {
        &self.catalog_sizes
    }

    /// Check if a specific informational notice was shown.
    pub fn has_info(&self, msg: &str) -> bool {
        self.infos.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific error notice was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }
}

impl Shell for MockShell {
    fn next_action(
        &mut self,
        catalog: &[TemplateEntry],
        _applied: &AppliedSet,
    ) -> Result<ShellAction> {
        self.catalog_sizes.push(catalog.len());
        Ok(self.actions.pop_front().unwrap_or(ShellAction::Quit))
    }

    fn notify(&mut self, message: &str, kind: NoticeKind) {
        match kind {
            NoticeKind::Info => self.infos.push(message.to_string()),
            NoticeKind::Error => self.errors.push(message.to_string()),
        }
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner)
    }
}

/// Spinner that does nothing.
#[derive(Debug, Default)]
pub struct MockSpinner;

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, _msg: &str) {}
    fn finish_success(&mut self, _msg: &str) {}
    fn finish_error(&mut self, _msg: &str) {}
}
