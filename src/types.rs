//! Core types for patchbay

use std::path::PathBuf;

/// A patch file queued for application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchArtifact {
    /// Path to the patch file
    pub path: PathBuf,
    /// File name shown to the operator
    pub name: String,
    /// 1-based position in the batch
    pub position: usize,
}

impl PatchArtifact {
    /// Create an artifact for `path` at `position` in the batch
    pub fn new(path: PathBuf, position: usize) -> Self {
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        Self {
            path,
            name,
            position,
        }
    }
}

/// A commit produced on the temporary branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRef {
    /// Full commit id as reported by git
    pub id: String,
    /// First line of the commit message, fetched on demand
    pub subject: Option<String>,
}

impl CommitRef {
    /// Create a reference without a subject
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            subject: None,
        }
    }

    /// Abbreviated id for display
    pub fn short_id(&self) -> &str {
        self.id
            .char_indices()
            .nth(8)
            .map_or(self.id.as_str(), |(end, _)| &self.id[..end])
    }
}

impl std::fmt::Display for CommitRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.subject {
            Some(subject) => write!(f, "{} {subject}", self.short_id()),
            None => write!(f, "{}", self.short_id()),
        }
    }
}

/// Branch bookkeeping for a single run
///
/// Created once at the start of a run and handed by reference to every
/// stage. The original branch never changes after capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    /// Branch checked out when the run started
    pub original_branch: String,
    /// Scratch branch the patches are applied to
    pub temp_branch: String,
    /// Protected branch the commits are replayed onto
    pub target_branch: String,
    /// Directory the patches were discovered in
    pub patch_dir: PathBuf,
}

/// How a single patch ended up on the temporary branch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchStatus {
    /// Applied cleanly
    Applied,
    /// Applied after the operator resolved a conflict
    Resolved,
    /// Skipped by the operator; produced no commit
    Skipped,
}

impl std::fmt::Display for PatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Applied => write!(f, "applied"),
            Self::Resolved => write!(f, "resolved"),
            Self::Skipped => write!(f, "skipped"),
        }
    }
}

/// Where the operator chose to stop the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbortPoint {
    /// Aborted from the conflict prompt while applying a patch
    PatchConflict {
        /// Patch that failed to apply
        patch: PatchArtifact,
    },
    /// Terminated from the review menu after replaying a commit
    Review {
        /// Commit under review when the run was terminated
        commit: CommitRef,
    },
}

/// Terminal state of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every patch was applied and every commit replayed
    Success,
    /// The operator stopped the run
    AbortedByOperator(AbortPoint),
    /// The run could not finish
    Failed(String),
}

impl RunOutcome {
    /// Process exit code for this outcome
    ///
    /// Terminating from the review menu is a clean exit; aborting a patch
    /// conflict is not.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Success | Self::AbortedByOperator(AbortPoint::Review { .. }) => 0,
            Self::AbortedByOperator(AbortPoint::PatchConflict { .. }) | Self::Failed(_) => 1,
        }
    }
}

impl std::fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::AbortedByOperator(AbortPoint::PatchConflict { patch }) => {
                write!(f, "aborted while applying {}", patch.name)
            }
            Self::AbortedByOperator(AbortPoint::Review { commit }) => {
                write!(f, "terminated during review of {}", commit.short_id())
            }
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_name_is_file_name() {
        let patch = PatchArtifact::new(PathBuf::from("incoming/0001-fix.patch"), 1);
        assert_eq!(patch.name, "0001-fix.patch");
        assert_eq!(patch.position, 1);
    }

    #[test]
    fn test_short_id_handles_short_ids() {
        assert_eq!(CommitRef::new("abc").short_id(), "abc");
        assert_eq!(
            CommitRef::new("0123456789abcdef0123456789abcdef01234567").short_id(),
            "01234567"
        );
    }

    #[test]
    fn test_short_id_counts_chars_not_bytes() {
        assert_eq!(CommitRef::new("ééééééééé").short_id(), "éééééééé");
        assert_eq!(CommitRef::new("abcdefgé").short_id(), "abcdefgé");
        assert_eq!(CommitRef::new("abcdefgéxyz").to_string(), "abcdefgé");
    }

    #[test]
    fn test_commit_display_includes_subject_when_known() {
        let mut commit = CommitRef::new("0123456789abcdef");
        assert_eq!(commit.to_string(), "01234567");
        commit.subject = Some("Fix parser".to_string());
        assert_eq!(commit.to_string(), "01234567 Fix parser");
    }

    #[test]
    fn test_exit_codes() {
        let patch = PatchArtifact::new(PathBuf::from("0001-x.patch"), 1);
        assert_eq!(RunOutcome::Success.exit_code(), 0);
        assert_eq!(
            RunOutcome::AbortedByOperator(AbortPoint::Review {
                commit: CommitRef::new("abc")
            })
            .exit_code(),
            0
        );
        assert_eq!(
            RunOutcome::AbortedByOperator(AbortPoint::PatchConflict { patch }).exit_code(),
            1
        );
        assert_eq!(RunOutcome::Failed("x".into()).exit_code(), 1);
    }
}
