//! Small builders for test data

#![allow(dead_code)]

use patchbay::config::ConfigFile;
use patchbay::types::{CommitRef, PatchArtifact, RunContext};
use patchbay::workflow::RunConfig;
use std::path::{Path, PathBuf};

/// Full-length fake commit id built from a short hex tag
pub fn sha(tag: &str) -> String {
    format!("{tag:0<40}")
}

/// Commit reference with a fake id
pub fn commit(tag: &str) -> CommitRef {
    CommitRef::new(sha(tag))
}

/// Patch `n` of a batch under `/patches`
pub fn patch(n: usize, slug: &str) -> PatchArtifact {
    PatchArtifact::new(PathBuf::from(format!("/patches/{n:04}-{slug}.patch")), n)
}

/// Run on `main` with the default temporary branch
pub fn run_context() -> RunContext {
    RunContext {
        original_branch: "main".to_string(),
        temp_branch: "patchbay/incoming".to_string(),
        target_branch: "main".to_string(),
        patch_dir: PathBuf::from("/patches"),
    }
}

/// Default settings reading patches from `patch_dir`
pub fn run_config(patch_dir: &Path) -> RunConfig {
    ConfigFile {
        patch_dir: Some(patch_dir.to_path_buf()),
        ..ConfigFile::default()
    }
    .resolve(Path::new("/repo"))
}
