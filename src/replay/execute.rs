//! Replay execution - effectful operations
//!
//! Cherry-picks each planned commit onto the target branch and hands the
//! result to the review menu before moving on.

use super::plan::ReplayPlan;
use crate::error::Result;
use crate::operator::Operator;
use crate::progress::{Phase, ProgressCallback};
use crate::review::{CommandPolicy, ReviewDecision, review_commit};
use crate::types::{CommitRef, RunContext};
use crate::vcs::{GitCommands, VcsGateway};
use tracing::{info, warn};

/// Result of the replay stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayOutcome {
    /// Every planned commit was replayed and reviewed
    Completed {
        /// Commits replayed, in order
        replayed: Vec<CommitRef>,
    },
    /// A cherry-pick stopped on a conflict
    ///
    /// Not skippable; [`fixup_commands`] lists how to finish by hand.
    Conflict {
        /// Commit that failed to replay
        commit: CommitRef,
        /// Git's explanation
        detail: String,
        /// Commits replayed before the conflict
        replayed: Vec<CommitRef>,
        /// Commits after the failed one, never attempted
        remaining: Vec<CommitRef>,
    },
    /// The operator terminated the run from the review menu
    Aborted {
        /// Commit under review
        commit: CommitRef,
        /// Commits replayed, including the one under review
        replayed: Vec<CommitRef>,
    },
}

impl ReplayOutcome {
    /// Commits that landed on the target branch
    pub fn replayed(&self) -> &[CommitRef] {
        match self {
            Self::Completed { replayed }
            | Self::Conflict { replayed, .. }
            | Self::Aborted { replayed, .. } => replayed,
        }
    }
}

/// Commands that finish a replay by hand after `remaining` was interrupted
pub fn fixup_commands(remaining: &[CommitRef]) -> Vec<String> {
    let mut commands = vec![
        "git status".to_string(),
        "git add <resolved files>".to_string(),
        "git cherry-pick --continue".to_string(),
    ];
    if !remaining.is_empty() {
        let ids: Vec<&str> = remaining.iter().map(|c| c.id.as_str()).collect();
        commands.push(format!("git cherry-pick {}", ids.join(" ")));
    }
    commands
}

/// Replay `plan` onto the target branch (EFFECTFUL)
///
/// Stops at the first conflict or when the operator terminates during
/// review. Commit subjects are looked up just before each replay.
///
/// # Arguments
/// * `gateway` - Git gateway
/// * `operator` - Answers the review menu
/// * `progress` - Progress callback for status updates
/// * `ctx` - Branches for this run
/// * `plan` - Commits to replay, oldest first
/// * `policy` - Limits for the review menu's command sub-loop
pub fn replay_commits(
    gateway: &dyn VcsGateway,
    operator: &mut dyn Operator,
    progress: &dyn ProgressCallback,
    ctx: &RunContext,
    plan: ReplayPlan,
    policy: &CommandPolicy,
) -> Result<ReplayOutcome> {
    progress.on_phase(Phase::Replaying);

    if plan.is_empty() {
        progress.on_message("Nothing to replay");
        return Ok(ReplayOutcome::Completed {
            replayed: Vec::new(),
        });
    }

    gateway.checkout(&ctx.target_branch)?;

    let total = plan.len();
    let mut replayed = Vec::with_capacity(total);
    let mut commits = plan.commits.into_iter();
    let mut index = 0;

    while let Some(mut commit) = commits.next() {
        index += 1;
        commit.subject = Some(gateway.commit_subject(&commit.id)?);
        progress.on_commit_start(&commit, index, total);

        let out = gateway.cherry_pick(&commit.id)?;
        if !out.success() {
            warn!(commit = %commit.id, "cherry-pick failed");
            return Ok(ReplayOutcome::Conflict {
                commit,
                detail: out.detail().to_string(),
                replayed,
                remaining: commits.collect(),
            });
        }
        replayed.push(commit.clone());

        match review_commit(gateway, operator, policy, &commit)? {
            ReviewDecision::Advance => {}
            ReviewDecision::Terminate => {
                return Ok(ReplayOutcome::Aborted { commit, replayed });
            }
        }
    }

    info!(count = replayed.len(), target = %ctx.target_branch, "replay complete");
    Ok(ReplayOutcome::Completed { replayed })
}
