//! The picker session: cache, catalog, applied set, and target file.
//!
//! A [`Session`] is built once at startup and driven either by [`run`]
//! with an interactive [`Shell`] or directly by the scripting commands.
//! Everything is synchronous; each call runs to completion or failure.

use std::path::{Path, PathBuf};

use crate::apply::apply;
use crate::cache::{CacheStore, InitOutcome};
use crate::catalog::{self, TemplateEntry};
use crate::error::{ApplyError, IgnoroError, Result, ScanError};
use crate::selection::{AppliedSet, MarkOutcome};
use crate::ui::{NoticeKind, Shell, ShellAction};

/// Result of selecting a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The template was appended; carries the byte count.
    Applied(u64),
    /// A template with this name was already applied in this session.
    AlreadyApplied,
}

/// What opening a session found.
#[derive(Debug)]
pub struct Opened {
    /// Whether the cache had to be fetched.
    pub outcome: InitOutcome,
    /// Set when the cache exists but could not be scanned. The catalog is
    /// empty and a refresh may recover it.
    pub scan_error: Option<ScanError>,
}

/// State for one run of the tool.
pub struct Session {
    store: CacheStore,
    catalog: Vec<TemplateEntry>,
    applied: AppliedSet,
    target: PathBuf,
}

impl Session {
    /// Create a session writing to `target`. Nothing is touched on disk yet.
    pub fn new(store: CacheStore, target: impl Into<PathBuf>) -> Self {
        Self {
            store,
            catalog: Vec::new(),
            applied: AppliedSet::new(),
            target: target.into(),
        }
    }

    /// Make sure the cache exists, then build the catalog.
    ///
    /// Only a failed initialization is an error; a scan failure is
    /// reported in [`Opened::scan_error`] with an empty catalog.
    pub fn open(&mut self) -> Result<Opened> {
        let outcome = self.store.ensure_initialized()?;
        let scan_error = self.rescan().err();
        if let Some(e) = &scan_error {
            tracing::warn!("{}", e);
        }
        Ok(Opened {
            outcome,
            scan_error,
        })
    }

    /// Current catalog.
    pub fn catalog(&self) -> &[TemplateEntry] {
        &self.catalog
    }

    /// Templates applied so far.
    pub fn applied(&self) -> &AppliedSet {
        &self.applied
    }

    /// Target ignore file.
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Underlying cache store.
    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    /// Rebuild the catalog from the cache. On failure the old catalog stays.
    pub fn rescan(&mut self) -> std::result::Result<usize, ScanError> {
        self.catalog = catalog::scan(self.store.location())?;
        tracing::debug!("Catalog has {} templates", self.catalog.len());
        Ok(self.catalog.len())
    }

    /// Refresh the cache and rescan. Returns the new catalog size.
    pub fn refresh(&mut self) -> Result<usize> {
        self.store.refresh()?;
        Ok(self.rescan()?)
    }

    /// Append `entry` to the target unless its name was already applied.
    ///
    /// The name is marked before writing so a repeated selection never
    /// appends twice, and released again if the write fails.
    pub fn select(
        &mut self,
        entry: &TemplateEntry,
    ) -> std::result::Result<SelectOutcome, ApplyError> {
        if self.applied.try_mark(entry.name()) == MarkOutcome::AlreadyApplied {
            return Ok(SelectOutcome::AlreadyApplied);
        }

        match apply(entry.source_path(), &self.target) {
            Ok(bytes) => Ok(SelectOutcome::Applied(bytes)),
            Err(e) => {
                self.applied.release(entry.name());
                Err(e)
            }
        }
    }

    /// Look up `name` in the catalog and select it.
    pub fn select_by_name(&mut self, name: &str) -> Result<SelectOutcome> {
        let entry = catalog::find(&self.catalog, name)
            .cloned()
            .ok_or_else(|| IgnoroError::UnknownTemplate {
                name: name.to_string(),
            })?;
        Ok(self.select(&entry)?)
    }
}

/// Status line for a selection attempt.
pub fn describe_selection(
    name: &str,
    result: &std::result::Result<SelectOutcome, ApplyError>,
) -> (String, NoticeKind) {
    match result {
        Ok(SelectOutcome::Applied(_)) => (format!("Use template {name}"), NoticeKind::Info),
        Ok(SelectOutcome::AlreadyApplied) => (
            format!("Template {name} is chosen once, skip..."),
            NoticeKind::Info,
        ),
        Err(e) => (e.to_string(), NoticeKind::Error),
    }
}

/// Drive `session` with `shell` until the user quits.
///
/// Refresh, scan, and apply failures become notices; only errors from the
/// shell itself end the loop early.
pub fn run(session: &mut Session, shell: &mut dyn Shell) -> Result<()> {
    loop {
        match shell.next_action(session.catalog(), session.applied())? {
            ShellAction::Select(entry) => {
                let result = session.select(&entry);
                let (message, kind) = describe_selection(entry.name(), &result);
                shell.notify(&message, kind);
            }
            ShellAction::Refresh => {
                let mut spinner = shell.start_spinner("Pull newest templates");
                match session.refresh() {
                    Ok(count) => {
                        spinner.finish_success(&format!("Templates updated ({count} available)"))
                    }
                    Err(e) => {
                        spinner.finish_error("Update failed");
                        shell.notify(&e.to_string(), NoticeKind::Error);
                    }
                }
            }
            ShellAction::Quit => return Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::store::tests::FakeSync;
    use crate::ui::MockShell;
    use std::fs;
    use tempfile::TempDir;

    const GO: &str = "*.exe\n*.test\n";

    fn session(temp: &TempDir, sync: FakeSync) -> Session {
        let store = CacheStore::new(temp.path().join("cache"), Box::new(sync));
        Session::new(store, temp.path().join("project").join(".gitignore"))
    }

    fn opened(temp: &TempDir) -> Session {
        fs::create_dir_all(temp.path().join("project")).unwrap();
        let mut s = session(
            temp,
            FakeSync::new(vec![
                ("Go.gitignore", GO),
                ("Global/macOS.gitignore", ".DS_Store\n"),
                ("README.md", "# templates\n"),
            ]),
        );
        s.open().unwrap();
        s
    }

    fn entry(s: &Session, name: &str) -> TemplateEntry {
        catalog::find(s.catalog(), name).cloned().unwrap()
    }

    #[test]
    fn open_populates_and_scans() {
        let temp = TempDir::new().unwrap();
        let s = opened(&temp);
        let names: Vec<_> = s.catalog().iter().map(|e| e.name()).collect();
        assert!(names.contains(&"Go.gitignore"));
        assert!(names.contains(&"macOS.gitignore"));
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn scan_failure_after_init_is_not_fatal() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("project")).unwrap();
        fs::write(temp.path().join("cache"), "not a directory").unwrap();
        let mut s = session(&temp, FakeSync::new(vec![("Go.gitignore", GO)]));

        let opened = s.open().unwrap();

        assert_eq!(opened.outcome, InitOutcome::AlreadyPresent);
        assert!(matches!(
            opened.scan_error,
            Some(ScanError::RootUnreadable { .. })
        ));
        assert!(s.catalog().is_empty());
    }

    #[test]
    fn refresh_recovers_from_failed_startup_scan() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("project")).unwrap();
        let cache = temp.path().join("cache");
        fs::write(&cache, "not a directory").unwrap();
        let mut s = session(&temp, FakeSync::new(vec![("Go.gitignore", GO)]));
        assert!(s.open().unwrap().scan_error.is_some());

        fs::remove_file(&cache).unwrap();
        fs::create_dir(&cache).unwrap();
        let mut shell = MockShell::new(vec![ShellAction::Refresh]);
        run(&mut s, &mut shell).unwrap();

        assert_eq!(shell.catalog_sizes(), &[0, 1]);
        assert!(shell.errors().is_empty());
    }

    #[test]
    fn end_to_end_select_then_repeat() {
        let temp = TempDir::new().unwrap();
        let mut s = opened(&temp);
        let go = entry(&s, "Go.gitignore");

        assert_eq!(s.select(&go).unwrap(), SelectOutcome::Applied(GO.len() as u64));
        assert_eq!(fs::read_to_string(s.target()).unwrap(), GO);

        assert_eq!(s.select(&go).unwrap(), SelectOutcome::AlreadyApplied);
        assert_eq!(fs::read_to_string(s.target()).unwrap(), GO);
    }

    #[test]
    fn same_name_at_another_path_counts_as_applied() {
        let temp = TempDir::new().unwrap();
        let mut s = opened(&temp);
        let go = entry(&s, "Go.gitignore");
        s.select(&go).unwrap();

        let twin = TemplateEntry::new("Go.gitignore", temp.path().join("elsewhere"));
        assert_eq!(s.select(&twin).unwrap(), SelectOutcome::AlreadyApplied);
    }

    #[test]
    fn failed_apply_releases_name() {
        let temp = TempDir::new().unwrap();
        let mut s = opened(&temp);
        let missing = TemplateEntry::new("Gone.gitignore", temp.path().join("nope"));

        assert!(matches!(
            s.select(&missing),
            Err(ApplyError::SourceUnreadable { .. })
        ));
        assert!(!s.applied().contains("Gone.gitignore"));
    }

    #[test]
    fn select_by_unknown_name_fails() {
        let temp = TempDir::new().unwrap();
        let mut s = opened(&temp);
        let err = s.select_by_name("Cobol.gitignore").unwrap_err();
        assert!(matches!(err, IgnoroError::UnknownTemplate { .. }));
    }

    #[test]
    fn failed_init_is_reported() {
        let temp = TempDir::new().unwrap();
        let sync = FakeSync::new(vec![("Go.gitignore", GO)]);
        sync.fail.set(true);
        let mut s = session(&temp, sync);

        let err = s.open().unwrap_err();
        assert!(matches!(err, IgnoroError::Cache(_)));
        assert!(!temp.path().join("cache").exists());
    }

    #[test]
    fn run_applies_and_reports() {
        let temp = TempDir::new().unwrap();
        let mut s = opened(&temp);
        let go = entry(&s, "Go.gitignore");
        let mut shell = MockShell::new(vec![
            ShellAction::Select(go.clone()),
            ShellAction::Select(go),
            ShellAction::Quit,
        ]);

        run(&mut s, &mut shell).unwrap();

        assert_eq!(
            shell.infos(),
            &[
                "Use template Go.gitignore".to_string(),
                "Template Go.gitignore is chosen once, skip...".to_string(),
            ]
        );
        assert_eq!(fs::read_to_string(s.target()).unwrap(), GO);
    }

    #[test]
    fn run_reports_apply_errors_and_continues() {
        let temp = TempDir::new().unwrap();
        let mut s = opened(&temp);
        let go = entry(&s, "Go.gitignore");
        let missing = TemplateEntry::new("Gone.gitignore", temp.path().join("nope"));
        let mut shell = MockShell::new(vec![
            ShellAction::Select(missing),
            ShellAction::Select(go),
        ]);

        run(&mut s, &mut shell).unwrap();

        assert!(shell.has_error("nope"));
        assert!(shell.has_info("Use template Go.gitignore"));
    }

    #[test]
    fn run_refresh_rescans() {
        let temp = TempDir::new().unwrap();
        let mut s = opened(&temp);
        fs::write(temp.path().join("cache").join("Zig.gitignore"), "zig-out/\n").unwrap();
        let mut shell = MockShell::new(vec![ShellAction::Refresh]);

        run(&mut s, &mut shell).unwrap();

        assert_eq!(shell.spinners(), &["Pull newest templates".to_string()]);
        assert_eq!(shell.catalog_sizes(), &[2, 3]);
        assert!(shell.errors().is_empty());
    }

    #[test]
    fn run_refresh_failure_keeps_catalog() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("project")).unwrap();
        let sync = FakeSync::new(vec![("Go.gitignore", GO)]);
        let fail = sync.fail.clone();
        let mut s = session(&temp, sync);
        s.open().unwrap();
        fail.set(true);
        let mut shell = MockShell::new(vec![ShellAction::Refresh]);

        run(&mut s, &mut shell).unwrap();

        assert!(shell.has_error("could not resolve host"));
        assert_eq!(shell.catalog_sizes(), &[1, 1]);
    }
}
