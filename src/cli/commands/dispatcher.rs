//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandContext`] for lazily opening the template session
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cache::{select_synchronizer, CacheStore, InitOutcome};
use crate::cli::args::{Cli, Commands};
use crate::config::Settings;
use crate::error::{Result, ScanError};
use crate::session::Session;
use crate::ui::Shell;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Settings and the lazily opened session
    /// * `shell` - Presentation layer for notices, spinners, and picking
    fn execute(&self, ctx: &mut CommandContext, shell: &mut dyn Shell) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Everything a command may need, opened on demand.
pub struct CommandContext {
    settings: Settings,
    cache_dir: PathBuf,
    working_dir: PathBuf,
    session: Option<Session>,
    init_outcome: Option<InitOutcome>,
    scan_error: Option<ScanError>,
}

impl CommandContext {
    /// Create a context. Nothing is fetched until [`Self::session`].
    pub fn new(settings: Settings, cache_dir: PathBuf, working_dir: PathBuf) -> Self {
        Self {
            settings,
            cache_dir,
            working_dir,
            session: None,
            init_outcome: None,
            scan_error: None,
        }
    }

    /// Loaded settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Cache location.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Ignore file the session appends to.
    pub fn target_path(&self) -> PathBuf {
        self.working_dir.join(&self.settings.target_file)
    }

    /// Open the session, initializing the cache if needed.
    ///
    /// Initialization failure is returned as an error and is fatal for
    /// the process. A failed scan is kept for [`Self::take_scan_error`]
    /// and the session starts with an empty catalog.
    pub fn session(&mut self, shell: &mut dyn Shell) -> Result<&mut Session> {
        let session = match self.session.take() {
            Some(session) => session,
            None => self.open(shell)?,
        };
        Ok(self.session.insert(session))
    }

    /// Like [`Self::session`], but a failed startup scan is an error.
    pub fn scanned_session(&mut self, shell: &mut dyn Shell) -> Result<&mut Session> {
        self.session(shell)?;
        if let Some(e) = self.scan_error.take() {
            return Err(e.into());
        }
        self.session(shell)
    }

    /// Scan failure from opening the session, if any. Reported once.
    pub fn take_scan_error(&mut self) -> Option<ScanError> {
        self.scan_error.take()
    }

    /// Whether opening the session had to fetch the cache.
    pub fn freshly_populated(&self) -> bool {
        self.init_outcome == Some(InitOutcome::Populated)
    }

    fn open(&mut self, shell: &mut dyn Shell) -> Result<Session> {
        let synchronizer = select_synchronizer(&self.settings, &self.cache_dir)?;
        let store = CacheStore::new(&self.cache_dir, synchronizer);
        let mut session = Session::new(store, self.target_path());

        let mut spinner = (!self.cache_dir.exists())
            .then(|| shell.start_spinner("Initializing Gitignore template source..."));

        match session.open() {
            Ok(opened) => {
                if opened.outcome == InitOutcome::Populated {
                    if let Some(spinner) = spinner.as_mut() {
                        spinner.finish_success("Gitignore templates are downloaded");
                    }
                }
                self.init_outcome = Some(opened.outcome);
                self.scan_error = opened.scan_error;
            }
            Err(e) => {
                if let Some(spinner) = spinner.as_mut() {
                    spinner.finish_error("Could not download Gitignore templates");
                }
                return Err(e);
            }
        }

        Ok(session)
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    context: CommandContext,
}

impl CommandDispatcher {
    /// Create a new dispatcher.
    pub fn new(context: CommandContext) -> Self {
        Self { context }
    }

    /// Get the command context.
    pub fn context(&self) -> &CommandContext {
        &self.context
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&mut self, cli: &Cli, shell: &mut dyn Shell) -> Result<CommandResult> {
        let ctx = &mut self.context;
        match &cli.command {
            Some(Commands::List(args)) => {
                super::list::ListCommand::new(args.clone()).execute(ctx, shell)
            }
            Some(Commands::Add(args)) => {
                super::add::AddCommand::new(args.clone()).execute(ctx, shell)
            }
            Some(Commands::Update) => super::update::UpdateCommand.execute(ctx, shell),
            Some(Commands::Completions(args)) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ctx, shell)
            }
            None => super::pick::PickCommand::new(console::user_attended()).execute(ctx, shell),
        }
    }
}
