//! End-to-end run: preflight, apply, replay, restore
//!
//! [`preflight`] gathers and validates everything without touching the
//! repository. [`execute_run`] performs the two stages and always finishes
//! with [`restore`], whatever the stages returned.

use crate::apply::{ApplyOutcome, ApplySummary, apply_patches, start_temp_branch};
use crate::error::{Error, Result};
use crate::operator::Operator;
use crate::patches::discover_patches;
use crate::progress::ProgressCallback;
use crate::replay::{ReplayOutcome, fixup_commands, plan_replay, replay_commits};
use crate::restore::{RestoreReport, restore};
use crate::review::CommandPolicy;
use crate::types::{AbortPoint, CommitRef, PatchArtifact, RunContext, RunOutcome};
use crate::vcs::{GitCommands, VcsGateway};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Settings for one run, after CLI flags and config files are merged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Branch the commits are replayed onto
    pub target_branch: String,
    /// Scratch branch for applying patches
    pub temp_branch: String,
    /// Directory holding the patch files
    pub patch_dir: PathBuf,
    /// Filename suffix of patch files
    pub patch_suffix: String,
    /// Extra arguments for `git am`
    pub apply_args: Vec<String>,
    /// Limits for the review menu's command sub-loop
    pub review: CommandPolicy,
}

/// Validated starting point of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preflight {
    /// Branches for this run
    pub ctx: RunContext,
    /// Patches to apply, in order
    pub patches: Vec<PatchArtifact>,
}

/// A replay that stopped on a conflict, with the way out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayFailure {
    /// Commit that did not replay
    pub commit: CommitRef,
    /// Git's explanation
    pub detail: String,
    /// Commands that finish the replay by hand
    pub fixups: Vec<String>,
}

/// Everything a finished run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// How the run ended
    pub outcome: RunOutcome,
    /// Per-patch results of the apply stage
    pub applied: ApplySummary,
    /// Commits that landed on the target branch
    pub replayed: Vec<CommitRef>,
    /// Set when the replay stopped on a conflict
    pub replay_failure: Option<ReplayFailure>,
    /// What restore managed to do
    pub restore: RestoreReport,
}

impl RunReport {
    /// Process exit code for this run
    pub const fn exit_code(&self) -> i32 {
        self.outcome.exit_code()
    }
}

#[derive(Debug, Default)]
struct StageRecord {
    applied: ApplySummary,
    replayed: Vec<CommitRef>,
    replay_failure: Option<ReplayFailure>,
}

/// Check every precondition and collect the patches (no mutation)
///
/// Fails when the operator is not on the target branch, when there are no
/// patches, or when the temporary branch already exists.
pub fn preflight(gateway: &dyn VcsGateway, config: &RunConfig) -> Result<Preflight> {
    let original_branch = match gateway.current_branch()? {
        Some(branch) if branch == config.target_branch => branch,
        other => {
            return Err(Error::WrongBranch {
                current: other.unwrap_or_else(|| "HEAD".to_string()),
                target: config.target_branch.clone(),
            });
        }
    };

    let patches = discover_patches(&config.patch_dir, &config.patch_suffix)?;

    if gateway.branch_exists(&config.temp_branch)? {
        return Err(Error::TempBranchExists(config.temp_branch.clone()));
    }

    Ok(Preflight {
        ctx: RunContext {
            original_branch,
            temp_branch: config.temp_branch.clone(),
            target_branch: config.target_branch.clone(),
            patch_dir: config.patch_dir.clone(),
        },
        patches,
    })
}

/// Apply, replay and restore (EFFECTFUL)
///
/// Only a failure to create the temporary branch is returned as `Err`.
/// Errors after that become [`RunOutcome::Failed`], and restore runs for
/// every outcome.
pub fn execute_run(
    gateway: &dyn VcsGateway,
    operator: &mut dyn Operator,
    progress: &dyn ProgressCallback,
    config: &RunConfig,
    preflight: &Preflight,
) -> Result<RunReport> {
    let ctx = &preflight.ctx;
    start_temp_branch(gateway, ctx)?;

    let mut record = StageRecord::default();
    let outcome = run_stages(gateway, operator, progress, config, preflight, &mut record)
        .unwrap_or_else(|e| {
            warn!(error = %e, "run failed");
            RunOutcome::Failed(e.to_string())
        });
    info!(%outcome, "stages finished");

    let restore = restore(gateway, progress, ctx);

    Ok(RunReport {
        outcome,
        applied: record.applied,
        replayed: record.replayed,
        replay_failure: record.replay_failure,
        restore,
    })
}

/// [`preflight`] followed by [`execute_run`]
pub fn run_workflow(
    gateway: &dyn VcsGateway,
    operator: &mut dyn Operator,
    progress: &dyn ProgressCallback,
    config: &RunConfig,
) -> Result<RunReport> {
    let preflight = preflight(gateway, config)?;
    execute_run(gateway, operator, progress, config, &preflight)
}

/// Abandon a `git am` left open by a failed apply stage
///
/// Restore cannot leave the temporary branch while `rebase-apply/` and an
/// unmerged index are still around.
fn close_apply_session(gateway: &dyn VcsGateway) {
    match gateway.apply_abort() {
        Ok(true) => info!("closed the am session left by the failed apply"),
        Ok(false) => debug!("no am session to close"),
        Err(e) => warn!(error = %e, "could not run 'git am --abort'"),
    }
}

fn run_stages(
    gateway: &dyn VcsGateway,
    operator: &mut dyn Operator,
    progress: &dyn ProgressCallback,
    config: &RunConfig,
    preflight: &Preflight,
    record: &mut StageRecord,
) -> Result<RunOutcome> {
    let ctx = &preflight.ctx;

    let applied = apply_patches(
        gateway,
        operator,
        progress,
        &preflight.patches,
        &config.apply_args,
    )
    .inspect_err(|_| close_apply_session(gateway))?;

    match applied {
        ApplyOutcome::Completed(summary) => record.applied = summary,
        ApplyOutcome::Aborted { patch, summary } => {
            record.applied = summary;
            return Ok(RunOutcome::AbortedByOperator(AbortPoint::PatchConflict {
                patch,
            }));
        }
    }

    let plan = plan_replay(gateway, progress, ctx)?;
    let outcome = replay_commits(gateway, operator, progress, ctx, plan, &config.review)?;
    record.replayed = outcome.replayed().to_vec();

    Ok(match outcome {
        ReplayOutcome::Completed { .. } => RunOutcome::Success,
        ReplayOutcome::Aborted { commit, .. } => {
            RunOutcome::AbortedByOperator(AbortPoint::Review { commit })
        }
        ReplayOutcome::Conflict {
            commit,
            detail,
            remaining,
            ..
        } => {
            let reason = format!("commit {} did not replay onto '{}'", commit.short_id(), ctx.target_branch);
            record.replay_failure = Some(ReplayFailure {
                commit,
                detail,
                fixups: fixup_commands(&remaining),
            });
            RunOutcome::Failed(reason)
        }
    })
}
