//! Settings schema.
//!
//! Maps the optional `config.yml` file. Every field has a default, so an
//! empty or missing file yields [`Settings::default`].

use serde::{Deserialize, Serialize};

/// Upstream repository holding one `*.gitignore` file per ecosystem.
pub const DEFAULT_SOURCE_URL: &str = "https://github.com/github/gitignore";

/// User-tunable settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Remote template repository.
    pub source_url: String,

    /// Branch to clone or download.
    pub branch: String,

    /// Which synchronizer to use.
    pub transport: TransportPreference,

    /// Name of the ignore file written in the working directory.
    pub target_file: String,

    /// HTTP timeout for archive downloads, in seconds.
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            branch: "main".to_string(),
            transport: TransportPreference::Auto,
            target_file: ".gitignore".to_string(),
            timeout_secs: 60,
        }
    }
}

impl Settings {
    /// URL of the gzip tarball snapshot for the configured branch.
    ///
    /// Follows GitHub's `archive/refs/heads/<branch>.tar.gz` layout.
    pub fn archive_url(&self) -> String {
        format!(
            "{}/archive/refs/heads/{}.tar.gz",
            self.source_url.trim_end_matches('/').trim_end_matches(".git"),
            self.branch
        )
    }
}

/// Transport selection policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportPreference {
    /// Git when available, otherwise archive download.
    #[default]
    Auto,
    /// Always use git.
    Git,
    /// Always download a tarball snapshot.
    Archive,
}
