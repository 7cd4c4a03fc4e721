//! Interactive terminal picker.

use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::FuzzySelect;
use std::io::Write;

use crate::catalog::TemplateEntry;
use crate::error::{IgnoroError, Result};
use crate::selection::AppliedSet;

use super::{NoticeKind, ProgressSpinner, Shell, ShellAction, SpinnerHandle, Theme};

const TITLE: &str = "Ignore templates";
const UPDATE_ITEM: &str = "↻ update gitignore templates";

/// Convert dialoguer errors to IgnoroError.
fn map_dialoguer_err(e: dialoguer::Error) -> IgnoroError {
    IgnoroError::Io(e.into())
}

/// Dialoguer theme without the default yellow `?` prefix.
fn prompt_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("".to_string()),
        ..ColorfulTheme::default()
    }
}

/// Fuzzy-filterable template list on the controlling terminal.
///
/// The first row triggers a refresh; Esc quits. Templates already
/// applied in this session are marked with a check.
pub struct TerminalShell {
    term: Term,
    errors: Term,
    theme: Theme,
    cursor: usize,
    header_shown: bool,
}

impl TerminalShell {
    /// Create a picker on stdout.
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
            errors: Term::stderr(),
            theme: Theme::detect(),
            cursor: 1,
            header_shown: false,
        }
    }

    /// Whether stdout is an interactive terminal.
    pub fn is_interactive(&self) -> bool {
        self.term.is_term()
    }
}

impl Default for TerminalShell {
    fn default() -> Self {
        Self::new()
    }
}

/// Rows shown in the picker: the update action followed by one per entry.
pub(crate) fn picker_items(catalog: &[TemplateEntry], applied: &AppliedSet) -> Vec<String> {
    let mut items = Vec::with_capacity(catalog.len() + 1);
    items.push(UPDATE_ITEM.to_string());
    items.extend(catalog.iter().map(|entry| {
        if applied.contains(entry.name()) {
            format!("{} ✓", entry.name())
        } else {
            entry.name().to_string()
        }
    }));
    items
}

/// Prompt above the list. Letters go to the filter, so only Esc quits.
pub(crate) fn prompt_line(count: usize) -> String {
    format!("{count} templates · type to filter · enter to choose · esc to quit")
}

/// Map a picked row back to an action.
pub(crate) fn action_for(selection: Option<usize>, catalog: &[TemplateEntry]) -> ShellAction {
    match selection {
        None => ShellAction::Quit,
        Some(0) => ShellAction::Refresh,
        Some(i) => catalog
            .get(i - 1)
            .cloned()
            .map(ShellAction::Select)
            .unwrap_or(ShellAction::Quit),
    }
}

impl Shell for TerminalShell {
    fn next_action(
        &mut self,
        catalog: &[TemplateEntry],
        applied: &AppliedSet,
    ) -> Result<ShellAction> {
        let items = picker_items(catalog, applied);
        let default = self.cursor.min(items.len() - 1);

        if !self.header_shown {
            writeln!(self.term, "{}\n", self.theme.format_header(TITLE)).ok();
            self.header_shown = true;
        }

        let selection = FuzzySelect::with_theme(&prompt_theme())
            .with_prompt(prompt_line(catalog.len()))
            .items(&items)
            .default(default)
            .vim_mode(false)
            .interact_on_opt(&self.term)
            .map_err(map_dialoguer_err)?;

        if let Some(i) = selection {
            self.cursor = i;
        }

        Ok(action_for(selection, catalog))
    }

    fn notify(&mut self, message: &str, kind: NoticeKind) {
        match kind {
            NoticeKind::Info => writeln!(self.term, "{}", self.theme.format_success(message)),
            NoticeKind::Error => writeln!(self.errors, "{}", self.theme.format_error(message)),
        }
        .ok();
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.term.is_term() {
            Box::new(ProgressSpinner::new(message))
        } else {
            Box::new(ProgressSpinner::hidden())
        }
    }
}
