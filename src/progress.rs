//! Progress reporting for the apply and replay stages

use crate::types::{CommitRef, PatchArtifact, PatchStatus};

/// Stage of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Applying patches onto the temporary branch
    Applying,
    /// Listing the commits to replay
    Planning,
    /// Cherry-picking commits onto the target branch
    Replaying,
    /// Returning to the original branch and removing the temporary one
    Restoring,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Applying => write!(f, "Applying patches"),
            Self::Planning => write!(f, "Finding commits to replay"),
            Self::Replaying => write!(f, "Replaying commits"),
            Self::Restoring => write!(f, "Restoring branches"),
        }
    }
}

/// Receives status updates while a run executes
pub trait ProgressCallback {
    /// A new phase started
    fn on_phase(&self, phase: Phase);

    /// About to apply `patch` (one of `total`)
    fn on_patch_start(&self, patch: &PatchArtifact, total: usize);

    /// `patch` failed to apply; `detail` is git's explanation
    fn on_patch_conflict(&self, patch: &PatchArtifact, detail: &str);

    /// `patch` is done
    fn on_patch_done(&self, patch: &PatchArtifact, status: PatchStatus);

    /// About to replay `commit` (1-based `index` of `total`)
    fn on_commit_start(&self, commit: &CommitRef, index: usize, total: usize);

    /// Free-form informational message
    fn on_message(&self, message: &str);

    /// Something went wrong that does not stop the run
    fn on_warning(&self, message: &str);
}

/// The per-patch progress line, e.g. `[1/2] Applying 0001-x.patch`
pub fn patch_line(patch: &PatchArtifact, total: usize) -> String {
    format!("[{}/{total}] Applying {}", patch.position, patch.name)
}

/// The per-commit progress line, e.g. `[1/2] Replaying 0123abcd Fix parser`
pub fn commit_line(commit: &CommitRef, index: usize, total: usize) -> String {
    format!("[{index}/{total}] Replaying {commit}")
}
