//! Transports that populate and refresh the template cache.
//!
//! Two [`Synchronizer`] variants exist:
//!
//! - [`GitSynchronizer`] clones the template repository and pulls updates
//! - [`ArchiveSynchronizer`] downloads and extracts a tarball snapshot
//!
//! Both leave the same directory of template files under the cache
//! location. One is chosen per process by [`select_synchronizer`].

pub mod archive;
pub mod git;

pub use archive::{unpack, ArchiveSynchronizer};
pub use git::GitSynchronizer;

use anyhow::Result;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::config::{Settings, TransportPreference};

/// Populates and refreshes a cache location from the remote source.
pub trait Synchronizer {
    /// Which transport this is.
    fn transport(&self) -> Transport;

    /// Fill `location`, which does not exist yet.
    fn populate(&self, location: &Path) -> Result<()>;

    /// Bring an existing `location` up to date.
    fn update(&self, location: &Path) -> Result<()>;
}

/// Concrete transport behind a [`Synchronizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Git,
    Archive,
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Git => write!(f, "git"),
            Self::Archive => write!(f, "archive"),
        }
    }
}

/// Decide which transport to use.
///
/// `auto` prefers git, but only when the cache is absent or already a git
/// checkout: a snapshot-populated cache cannot be pulled.
pub fn choose_transport(
    preference: TransportPreference,
    git_available: bool,
    location: &Path,
) -> Transport {
    match preference {
        TransportPreference::Git => Transport::Git,
        TransportPreference::Archive => Transport::Archive,
        TransportPreference::Auto => {
            let fresh_or_checkout =
                !location.exists() || GitSynchronizer::is_checkout(location);
            if git_available && fresh_or_checkout {
                Transport::Git
            } else {
                Transport::Archive
            }
        }
    }
}

/// Build the synchronizer for this process from settings and environment.
pub fn select_synchronizer(settings: &Settings, location: &Path) -> Result<Box<dyn Synchronizer>> {
    let git_available = settings.transport == TransportPreference::Auto
        && GitSynchronizer::is_available();
    let transport = choose_transport(settings.transport, git_available, location);
    tracing::debug!("Using {} transport for {}", transport, location.display());
    build_synchronizer(transport, settings)
}

/// Construct a synchronizer of the given kind.
pub fn build_synchronizer(transport: Transport, settings: &Settings) -> Result<Box<dyn Synchronizer>> {
    Ok(match transport {
        Transport::Git => Box::new(GitSynchronizer::new(
            settings.source_url.clone(),
            Some(settings.branch.clone()),
        )),
        Transport::Archive => Box::new(ArchiveSynchronizer::with_timeout(
            settings.archive_url(),
            Duration::from_secs(settings.timeout_secs),
        )?),
    })
}
