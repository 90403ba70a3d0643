//! Patch file discovery

use crate::error::{Error, Result};
use crate::types::PatchArtifact;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Suffix used when none is configured
pub const DEFAULT_SUFFIX: &str = ".patch";

/// List the patch files in `dir`, ordered by file name.
///
/// Only regular files whose name ends in `suffix` are returned.
/// `git format-patch` numbers its output (`0001-...`), so name order is
/// series order.
pub fn discover_patches(dir: &Path, suffix: &str) -> Result<Vec<PatchArtifact>> {
    if !dir.is_dir() {
        return Err(Error::PatchDirMissing(dir.to_path_buf()));
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        if name.to_string_lossy().ends_with(suffix) {
            paths.push(entry.path());
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    if paths.is_empty() {
        return Err(Error::NoPatches {
            dir: dir.to_path_buf(),
            suffix: suffix.to_string(),
        });
    }

    debug!(count = paths.len(), dir = %dir.display(), "discovered patches");

    Ok(paths
        .into_iter()
        .enumerate()
        .map(|(i, path)| PatchArtifact::new(path, i + 1))
        .collect())
}
