//! Archive-backed synchronization.
//!
//! Downloads a gzip tarball snapshot of the template repository and
//! extracts it into the cache. Used when `git` is not available.
//!
//! Extraction happens in a staging directory beside the cache location and
//! is moved into place only once the whole archive unpacked cleanly, so a
//! failed download never leaves a half-written cache behind.

use anyhow::{bail, Context, Result};
use flate2::read::GzDecoder;
use reqwest::blocking::Client;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Component, Path, PathBuf};
use std::time::Duration;
use tar::{Archive, EntryType};

use super::{Synchronizer, Transport};

/// Fetches template snapshots over HTTP/HTTPS.
pub struct ArchiveSynchronizer {
    url: String,
    client: Client,
    timeout: Duration,
    strip_components: usize,
}

impl ArchiveSynchronizer {
    /// Create a synchronizer with the default 60-second timeout.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(url, Duration::from_secs(60))
    }

    /// Create a synchronizer with a custom timeout.
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("ignoro/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            url: url.into(),
            client,
            timeout,
            strip_components: 1,
        })
    }

    /// Number of leading path components dropped from every entry.
    ///
    /// GitHub snapshots wrap everything in a single `<repo>-<branch>/`
    /// directory, hence the default of 1.
    pub fn strip_components(mut self, count: usize) -> Self {
        self.strip_components = count;
        self
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Download the snapshot and unpack it into `dest`.
    fn download_into(&self, dest: &Path) -> Result<usize> {
        tracing::info!("Downloading {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .send()
            .with_context(|| format!("Failed to download {}", self.url))?;

        if !response.status().is_success() {
            bail!("HTTP {} fetching {}", response.status(), self.url);
        }

        unpack(response, dest, self.strip_components)
    }

    /// Download into a fresh staging directory, cleaning it up on failure.
    fn stage(&self, location: &Path) -> Result<PathBuf> {
        let staging = sibling(location, "partial");
        remove_if_exists(&staging)?;

        match self.download_into(&staging) {
            Ok(count) => {
                tracing::debug!("Extracted {} files into {}", count, staging.display());
                Ok(staging)
            }
            Err(e) => {
                if let Err(cleanup) = remove_if_exists(&staging) {
                    tracing::warn!("Failed to remove {}: {}", staging.display(), cleanup);
                }
                Err(e)
            }
        }
    }
}

impl Synchronizer for ArchiveSynchronizer {
    fn transport(&self) -> Transport {
        Transport::Archive
    }

    fn populate(&self, location: &Path) -> Result<()> {
        if let Some(parent) = location.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let staging = self.stage(location)?;
        fs::rename(&staging, location).with_context(|| {
            format!(
                "Failed to move {} to {}",
                staging.display(),
                location.display()
            )
        })
    }

    fn update(&self, location: &Path) -> Result<()> {
        let staging = self.stage(location)?;
        let previous = sibling(location, "previous");
        remove_if_exists(&previous)?;

        fs::rename(location, &previous)
            .with_context(|| format!("Failed to move aside {}", location.display()))?;

        if let Err(e) = fs::rename(&staging, location) {
            // Put the old snapshot back before reporting.
            fs::rename(&previous, location).ok();
            remove_if_exists(&staging).ok();
            return Err(e).context("Failed to swap in the new snapshot");
        }

        if let Err(e) = fs::remove_dir_all(&previous) {
            tracing::warn!("Failed to remove {}: {}", previous.display(), e);
        }
        Ok(())
    }
}

/// Extract a gzip tarball from `reader` into `dest`.
///
/// Every entry path is checked before anything is written: a root, drive
/// prefix, or `..` component fails the whole extraction. Symlinks and
/// hard links are skipped. Returns the number of regular files written.
pub fn unpack<R: Read>(reader: R, dest: &Path, strip_components: usize) -> Result<usize> {
    fs::create_dir_all(dest).with_context(|| format!("Failed to create {}", dest.display()))?;

    let mut archive = Archive::new(GzDecoder::new(reader));
    let mut written = 0;

    for entry in archive.entries().context("Failed to read archive")? {
        let mut entry = entry.context("Corrupt archive entry")?;
        let raw = entry.path().context("Invalid entry path")?.into_owned();

        let Some(relative) = contained_path(&raw, strip_components)? else {
            continue;
        };
        let target = dest.join(&relative);

        match entry.header().entry_type() {
            EntryType::Directory => {
                fs::create_dir_all(&target)?;
            }
            EntryType::Regular | EntryType::Continuous => {
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)?;
                }
                let mut file = File::create(&target)
                    .with_context(|| format!("Failed to create {}", target.display()))?;
                io::copy(&mut entry, &mut file)
                    .with_context(|| format!("Failed to write {}", target.display()))?;
                written += 1;
            }
            other => {
                tracing::debug!("Skipping {:?} entry {}", other, raw.display());
            }
        }
    }

    Ok(written)
}

/// Resolve an archive entry path to a path relative to the extraction root.
///
/// Returns `None` for entries that vanish after stripping (the top-level
/// directory itself, `pax_global_header`).
fn contained_path(raw: &Path, strip_components: usize) -> Result<Option<PathBuf>> {
    let mut parts = Vec::new();

    for component in raw.components() {
        match component {
            Component::Normal(part) => parts.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                bail!("Illegal file path in archive: {}", raw.display());
            }
        }
    }

    if parts.len() <= strip_components {
        return Ok(None);
    }

    Ok(Some(parts[strip_components..].iter().collect()))
}

fn sibling(location: &Path, suffix: &str) -> PathBuf {
    let name = location
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "ignoro".to_string());
    location.with_file_name(format!("{name}.{suffix}"))
}

fn remove_if_exists(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use httpmock::prelude::*;
    use tempfile::TempDir;

    /// Build a gzip tarball from `(path, contents)` pairs.
    ///
    /// Paths are written raw into the header so that hostile names like
    /// `../evil` survive; `tar::Header::set_path` would refuse them.
    pub(crate) fn tarball(files: &[(&str, &str)]) -> Vec<u8> {
        let enc = GzEncoder::new(Vec::new(), Compression::default());
        let mut builder = tar::Builder::new(enc);

        for (path, contents) in files {
            let mut header = tar::Header::new_old();
            let name = path.as_bytes();
            header.as_old_mut().name[..name.len()].copy_from_slice(name);
            header.set_size(contents.len() as u64);
            header.set_mode(0o644);
            header.set_entry_type(EntryType::Regular);
            header.set_cksum();
            builder.append(&header, contents.as_bytes()).unwrap();
        }

        builder.into_inner().unwrap().finish().unwrap()
    }

    #[test]
    fn reports_archive_transport() {
        let sync = ArchiveSynchronizer::new("https://example.com/a.tar.gz").unwrap();
        assert_eq!(sync.transport(), Transport::Archive);
        assert_eq!(sync.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn contained_path_strips_top_level_dir() {
        let path = contained_path(Path::new("gitignore-main/Global/Vim.gitignore"), 1).unwrap();
        assert_eq!(path, Some(PathBuf::from("Global/Vim.gitignore")));
    }

    #[test]
    fn contained_path_skips_top_level_entries() {
        assert_eq!(contained_path(Path::new("gitignore-main/"), 1).unwrap(), None);
        assert_eq!(contained_path(Path::new("pax_global_header"), 1).unwrap(), None);
    }

    #[test]
    fn contained_path_rejects_traversal() {
        assert!(contained_path(Path::new("../../etc/passwd"), 0).is_err());
        assert!(contained_path(Path::new("gitignore-main/../../evil"), 1).is_err());
        assert!(contained_path(Path::new("/etc/passwd"), 0).is_err());
    }

    #[test]
    fn unpack_writes_files_under_dest() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("out");
        let data = tarball(&[
            ("gitignore-main/Go.gitignore", "*.exe\n"),
            ("gitignore-main/Global/Vim.gitignore", "*.swp\n"),
        ]);

        let count = unpack(data.as_slice(), &dest, 1).unwrap();

        assert_eq!(count, 2);
        assert_eq!(fs::read_to_string(dest.join("Go.gitignore")).unwrap(), "*.exe\n");
        assert!(dest.join("Global/Vim.gitignore").exists());
    }

    #[test]
    fn unpack_rejects_path_traversal() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("a").join("b").join("out");
        let data = tarball(&[
            ("gitignore-main/Go.gitignore", "*.exe\n"),
            ("../../evil", "pwned\n"),
        ]);

        let err = unpack(data.as_slice(), &dest, 0).unwrap_err();

        assert!(err.to_string().contains("Illegal file path"));
        assert!(!temp.path().join("a").join("evil").exists());
        assert!(!temp.path().join("evil").exists());
    }

    #[test]
    fn unpack_rejects_garbage() {
        let temp = TempDir::new().unwrap();
        let result = unpack(&b"definitely not gzip"[..], temp.path(), 1);
        assert!(result.is_err());
    }

    #[test]
    fn populate_downloads_and_extracts() {
        let server = MockServer::start();
        let body = tarball(&[("gitignore-main/Go.gitignore", "*.exe\n")]);
        server.mock(|when, then| {
            when.method(GET).path("/main.tar.gz");
            then.status(200).body(body.clone());
        });

        let temp = TempDir::new().unwrap();
        let location = temp.path().join("cache").join("ignoro");
        let sync = ArchiveSynchronizer::new(server.url("/main.tar.gz")).unwrap();

        sync.populate(&location).unwrap();

        assert!(location.join("Go.gitignore").exists());
        assert!(!sibling(&location, "partial").exists());
    }

    #[test]
    fn populate_fails_on_404_without_leaving_files() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/main.tar.gz");
            then.status(404).body("Not Found");
        });

        let temp = TempDir::new().unwrap();
        let location = temp.path().join("ignoro");
        let sync = ArchiveSynchronizer::new(server.url("/main.tar.gz")).unwrap();

        let err = sync.populate(&location).unwrap_err();

        assert!(err.to_string().contains("404"), "Error should mention 404: {}", err);
        assert!(!location.exists());
        assert!(!sibling(&location, "partial").exists());
    }

    #[test]
    fn populate_with_traversal_entry_fails_cleanly() {
        let server = MockServer::start();
        let body = tarball(&[
            ("gitignore-main/Go.gitignore", "*.exe\n"),
            ("gitignore-main/../../../evil", "pwned\n"),
        ]);
        server.mock(|when, then| {
            when.method(GET).path("/main.tar.gz");
            then.status(200).body(body.clone());
        });

        let temp = TempDir::new().unwrap();
        let location = temp.path().join("cache").join("ignoro");
        let sync = ArchiveSynchronizer::new(server.url("/main.tar.gz")).unwrap();

        assert!(sync.populate(&location).is_err());
        assert!(!location.exists());
        assert!(!temp.path().join("evil").exists());
        assert!(!temp.path().join("cache").join("evil").exists());
    }

    #[test]
    fn update_swaps_in_new_snapshot() {
        let server = MockServer::start();
        let body = tarball(&[("gitignore-main/Rust.gitignore", "target/\n")]);
        server.mock(|when, then| {
            when.method(GET).path("/main.tar.gz");
            then.status(200).body(body.clone());
        });

        let temp = TempDir::new().unwrap();
        let location = temp.path().join("ignoro");
        fs::create_dir_all(&location).unwrap();
        fs::write(location.join("Old.gitignore"), "old\n").unwrap();

        let sync = ArchiveSynchronizer::new(server.url("/main.tar.gz")).unwrap();
        sync.update(&location).unwrap();

        assert!(location.join("Rust.gitignore").exists());
        assert!(!location.join("Old.gitignore").exists());
        assert!(!sibling(&location, "previous").exists());
    }

    #[test]
    fn failed_update_keeps_existing_cache() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/main.tar.gz");
            then.status(500).body("Internal Server Error");
        });

        let temp = TempDir::new().unwrap();
        let location = temp.path().join("ignoro");
        fs::create_dir_all(&location).unwrap();
        fs::write(location.join("Go.gitignore"), "*.exe\n").unwrap();

        let sync = ArchiveSynchronizer::new(server.url("/main.tar.gz")).unwrap();
        let err = sync.update(&location).unwrap_err();

        assert!(err.to_string().contains("500"));
        assert_eq!(
            fs::read_to_string(location.join("Go.gitignore")).unwrap(),
            "*.exe\n"
        );
    }
}
