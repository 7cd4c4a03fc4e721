//! Template catalog.
//!
//! Walks the cache location and lists every file whose name is a non-empty
//! prefix followed by `.gitignore`. The walk is lazy ([`TemplateWalk`]);
//! unreadable entries below the root are logged and skipped, while an
//! unreadable root is reported as [`ScanError::RootUnreadable`].
//!
//! Symlinks are followed, so a linked template is listed under the link's
//! name. Broken links and link loops are entries that fail and are skipped.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::error::ScanError;

/// Suffix identifying template files.
pub const TEMPLATE_SUFFIX: &str = ".gitignore";

/// A template file found in the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateEntry {
    name: String,
    #[serde(rename = "path")]
    source_path: PathBuf,
}

impl TemplateEntry {
    /// Create an entry.
    pub fn new(name: impl Into<String>, source_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            source_path: source_path.into(),
        }
    }

    /// File name, e.g. `Go.gitignore`. Used as the selection key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Absolute path of the template inside the cache.
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }
}

/// Check whether a file name qualifies as a template.
pub fn is_template_name(name: &str) -> bool {
    name.len() > TEMPLATE_SUFFIX.len() && name.ends_with(TEMPLATE_SUFFIX)
}

/// Scan `root` into a list of templates.
///
/// Entries come out in file-name order per directory, so the same cache
/// state always yields the same sequence. Duplicate names in different
/// directories are all listed.
pub fn scan(root: &Path) -> Result<Vec<TemplateEntry>, ScanError> {
    TemplateWalk::new(root)?.collect()
}

/// Lazy iterator over the templates under a root directory.
pub struct TemplateWalk {
    root: PathBuf,
    inner: walkdir::FilterEntry<walkdir::IntoIter, fn(&DirEntry) -> bool>,
}

impl TemplateWalk {
    /// Start walking `root`. Fails if the root itself cannot be listed.
    pub fn new(root: &Path) -> Result<Self, ScanError> {
        fs::read_dir(root).map_err(|source| ScanError::RootUnreadable {
            root: root.to_path_buf(),
            source,
        })?;

        let inner = WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(not_vcs_metadata as fn(&DirEntry) -> bool);

        Ok(Self {
            root: root.to_path_buf(),
            inner,
        })
    }
}

impl Iterator for TemplateWalk {
    type Item = Result<TemplateEntry, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    let source = e
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("filesystem loop"));
                    return Some(Err(ScanError::RootUnreadable {
                        root: self.root.clone(),
                        source,
                    }));
                }
                Err(e) => {
                    tracing::debug!("Skipping unreadable cache entry: {}", e);
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                continue;
            }

            let Some(name) = entry.file_name().to_str() else {
                continue;
            };

            if is_template_name(name) {
                return Some(Ok(TemplateEntry::new(name, entry.path())));
            }
        }
    }
}

fn not_vcs_metadata(entry: &DirEntry) -> bool {
    !(entry.depth() > 0 && entry.file_type().is_dir() && entry.file_name() == ".git")
}

/// Find the first entry with the given name.
pub fn find<'a>(entries: &'a [TemplateEntry], name: &str) -> Option<&'a TemplateEntry> {
    entries.iter().find(|e| e.name() == name)
}
