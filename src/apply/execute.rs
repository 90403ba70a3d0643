//! Patch application - effectful operations
//!
//! Runs `git am` for each patch in order on the temporary branch and hands
//! failures to the conflict loop.

use super::conflict::{ConflictResolution, resolve_conflict};
use crate::error::Result;
use crate::operator::Operator;
use crate::progress::{Phase, ProgressCallback};
use crate::types::{PatchArtifact, PatchStatus, RunContext};
use crate::vcs::{GitCommands, VcsGateway};
use tracing::info;

/// What happened to each patch, in batch order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplySummary {
    /// Patches processed so far with their final status
    pub results: Vec<(PatchArtifact, PatchStatus)>,
}

impl ApplySummary {
    /// Patches that produced a commit
    #[must_use]
    pub fn committed_count(&self) -> usize {
        self.results
            .iter()
            .filter(|(_, status)| *status != PatchStatus::Skipped)
            .count()
    }

    /// Patches the operator skipped
    pub fn skipped(&self) -> impl Iterator<Item = &PatchArtifact> {
        self.results
            .iter()
            .filter(|(_, status)| *status == PatchStatus::Skipped)
            .map(|(patch, _)| patch)
    }
}

/// Result of the apply stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Every patch was applied or skipped
    Completed(ApplySummary),
    /// The operator aborted at the conflict prompt for `patch`
    Aborted {
        /// Patch being resolved when the operator aborted
        patch: PatchArtifact,
        /// Patches settled before the abort
        summary: ApplySummary,
    },
}

/// Create the temporary branch from the target branch and check it out
pub fn start_temp_branch(gateway: &dyn VcsGateway, ctx: &RunContext) -> Result<()> {
    info!(temp = %ctx.temp_branch, target = %ctx.target_branch, "creating temporary branch");
    gateway.create_branch(&ctx.temp_branch, &ctx.target_branch)
}

/// Apply `patches` in order onto the checked-out temporary branch (EFFECTFUL)
///
/// Each clean apply yields one commit. A patch that does not apply drops
/// into [`resolve_conflict`]; a skipped patch yields no commit.
///
/// # Arguments
/// * `gateway` - Git gateway
/// * `operator` - Answers the conflict prompt
/// * `progress` - Progress callback for status updates
/// * `patches` - Patches in batch order
/// * `apply_args` - Extra arguments for `git am`
pub fn apply_patches(
    gateway: &dyn VcsGateway,
    operator: &mut dyn Operator,
    progress: &dyn ProgressCallback,
    patches: &[PatchArtifact],
    apply_args: &[String],
) -> Result<ApplyOutcome> {
    progress.on_phase(Phase::Applying);
    let mut summary = ApplySummary::default();

    for patch in patches {
        progress.on_patch_start(patch, patches.len());

        let out = gateway.apply_patch(&patch.path, apply_args)?;
        let status = if out.success() {
            PatchStatus::Applied
        } else {
            progress.on_patch_conflict(patch, out.detail());
            match resolve_conflict(gateway, operator, progress, patch)? {
                ConflictResolution::Resolved => PatchStatus::Resolved,
                ConflictResolution::Skipped => PatchStatus::Skipped,
                ConflictResolution::Aborted => {
                    return Ok(ApplyOutcome::Aborted {
                        patch: patch.clone(),
                        summary,
                    });
                }
            }
        };

        progress.on_patch_done(patch, status);
        summary.results.push((patch.clone(), status));
    }

    info!(
        committed = summary.committed_count(),
        total = patches.len(),
        "patches applied"
    );
    Ok(ApplyOutcome::Completed(summary))
}
