//! Visual theme and styling.

use console::Style;

/// Styles for status lines and the picker banner.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Template applied, templates updated (green).
    pub notice: Style,
    /// Any failure reported to the user (red bold).
    pub failure: Style,
    /// Picker title (white on green).
    pub banner: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme {
    /// Colored theme.
    pub fn new() -> Self {
        Self {
            notice: Style::new().green(),
            failure: Style::new().red().bold(),
            banner: Style::new().bold().white().on_green(),
        }
    }

    /// Theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            notice: Style::new(),
            failure: Style::new(),
            banner: Style::new(),
        }
    }

    /// Pick [`Theme::new`] or [`Theme::plain`] for the current terminal.
    pub fn detect() -> Self {
        if should_use_colors() {
            Self::new()
        } else {
            Self::plain()
        }
    }

    /// `✓ msg` in the notice style.
    pub fn format_success(&self, msg: &str) -> String {
        self.notice.apply_to(format!("✓ {msg}")).to_string()
    }

    /// `✗ msg` in the failure style.
    pub fn format_error(&self, msg: &str) -> String {
        self.failure.apply_to(format!("✗ {msg}")).to_string()
    }

    /// Padded banner line.
    pub fn format_header(&self, title: &str) -> String {
        self.banner.apply_to(format!(" {title} ")).to_string()
    }
}

/// Whether stdout should get ANSI colors.
///
/// Honors `NO_COLOR` (<https://no-color.org/>), which `--no-color` also sets.
pub fn should_use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none() && console::Term::stdout().is_term()
}
