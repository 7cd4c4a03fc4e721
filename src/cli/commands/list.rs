//! List command implementation.
//!
//! Prints every template name in the catalog, one per line, or the whole
//! catalog as JSON with `--json`.

use crate::catalog::TemplateEntry;
use crate::cli::args::ListArgs;
use crate::error::Result;
use crate::ui::Shell;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(args: ListArgs) -> Self {
        Self { args }
    }

    /// Render the catalog.
    pub fn render(&self, catalog: &[TemplateEntry]) -> Result<String> {
        if self.args.json {
            return Ok(serde_json::to_string_pretty(catalog).map_err(anyhow::Error::from)?);
        }

        let mut out = String::new();
        for entry in catalog {
            out.push_str(entry.name());
            out.push('\n');
        }
        Ok(out)
    }
}

impl Command for ListCommand {
    fn execute(&self, ctx: &mut CommandContext, shell: &mut dyn Shell) -> Result<CommandResult> {
        let session = ctx.scanned_session(shell)?;
        print!("{}", self.render(session.catalog())?);
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<TemplateEntry> {
        vec![
            TemplateEntry::new("Go.gitignore", "/cache/Go.gitignore"),
            TemplateEntry::new("macOS.gitignore", "/cache/Global/macOS.gitignore"),
        ]
    }

    #[test]
    fn renders_one_name_per_line() {
        let out = ListCommand::new(ListArgs::default())
            .render(&catalog())
            .unwrap();
        assert_eq!(out, "Go.gitignore\nmacOS.gitignore\n");
    }

    #[test]
    fn renders_json_with_paths() {
        let out = ListCommand::new(ListArgs { json: true })
            .render(&catalog())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value[0]["name"], "Go.gitignore");
        assert_eq!(value[1]["path"], "/cache/Global/macOS.gitignore");
    }

    #[test]
    fn empty_catalog_renders_nothing() {
        let out = ListCommand::new(ListArgs::default()).render(&[]).unwrap();
        assert!(out.is_empty());
    }
}
