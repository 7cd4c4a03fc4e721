//! Git-backed synchronization.
//!
//! Populates the cache with a full clone of the template repository and
//! refreshes it with a fast-forward pull, so updates are incremental.

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::Command;

use super::{Synchronizer, Transport};

/// Clones and pulls the template repository with the `git` binary.
#[derive(Debug, Clone)]
pub struct GitSynchronizer {
    url: String,
    branch: Option<String>,
}

impl GitSynchronizer {
    /// Create a synchronizer for `url`, optionally pinned to a branch.
    pub fn new(url: impl Into<String>, branch: Option<String>) -> Self {
        Self {
            url: url.into(),
            branch,
        }
    }

    /// Remote URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Check whether a working `git` is on PATH.
    pub fn is_available() -> bool {
        Command::new("git")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    /// Check whether `location` is a git checkout.
    pub fn is_checkout(location: &Path) -> bool {
        location.join(".git").exists()
    }

    fn clone_repo(&self, location: &Path) -> Result<()> {
        if let Some(parent) = location.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let mut cmd = Command::new("git");
        cmd.arg("clone");

        if let Some(branch) = &self.branch {
            cmd.arg("--branch").arg(branch);
        }

        cmd.arg("--").arg(&self.url).arg(location);

        tracing::debug!("Running {:?}", cmd);
        let output = cmd.output().context("Failed to run git clone")?;
        if !output.status.success() {
            bail!(
                "Git clone failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(())
    }

    fn pull(&self, location: &Path) -> Result<()> {
        if !Self::is_checkout(location) {
            bail!("{} is not a git checkout", location.display());
        }

        let output = Command::new("git")
            .args(["pull", "--ff-only"])
            .current_dir(location)
            .output()
            .context("Failed to run git pull")?;

        if !output.status.success() {
            bail!(
                "Git pull failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(())
    }
}

impl Synchronizer for GitSynchronizer {
    fn transport(&self) -> Transport {
        Transport::Git
    }

    fn populate(&self, location: &Path) -> Result<()> {
        tracing::info!("Cloning {} into {}", self.url, location.display());
        self.clone_repo(location)
    }

    fn update(&self, location: &Path) -> Result<()> {
        tracing::info!("Pulling template updates in {}", location.display());
        self.pull(location)
    }
}
