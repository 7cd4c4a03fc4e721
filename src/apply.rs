//! Appending a template to the target ignore file.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

use crate::error::ApplyError;

/// Append the bytes of `source` to the end of `target`.
///
/// `target` is created if absent and never truncated. No separator is
/// inserted between existing content and the template. The target is
/// synced before returning. Returns the number of bytes appended.
pub fn apply(source: &Path, target: &Path) -> Result<u64, ApplyError> {
    let mut src = File::open(source).map_err(|e| ApplyError::SourceUnreadable {
        path: source.to_path_buf(),
        source: e,
    })?;

    let write_failed = |e: io::Error| ApplyError::WriteFailed {
        path: target.to_path_buf(),
        source: e,
    };

    let mut dest = OpenOptions::new()
        .create(true)
        .append(true)
        .open(target)
        .map_err(write_failed)?;

    let copied = io::copy(&mut src, &mut dest).map_err(write_failed)?;
    dest.sync_all().map_err(write_failed)?;

    tracing::debug!(
        "Appended {} bytes from {} to {}",
        copied,
        source.display(),
        target.display()
    );
    Ok(copied)
}
