//! Replay planning
//!
//! Turns the range query `target..temp` into the ordered list of commits to
//! cherry-pick. The parser is pure; [`plan_replay`] is the thin effectful
//! wrapper that asks git.

use crate::error::Result;
use crate::progress::{Phase, ProgressCallback};
use crate::types::{CommitRef, RunContext};
use crate::vcs::{GitCommands, VcsGateway};
use tracing::{debug, warn};

/// Commits to replay, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayPlan {
    /// Commits on the temporary branch but not on the target branch
    pub commits: Vec<CommitRef>,
}

impl ReplayPlan {
    /// Whether there is nothing to replay
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// Number of commits to replay
    #[must_use]
    pub fn len(&self) -> usize {
        self.commits.len()
    }
}

/// Parse `git rev-list --reverse` output (PURE)
///
/// One commit id per line, order preserved. Blank lines are ignored; lines
/// that are not hex object ids are logged and dropped.
#[must_use]
pub fn parse_commit_list(output: &str) -> Vec<CommitRef> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| {
            let valid = is_object_id(line);
            if !valid {
                warn!(line, "ignoring unexpected rev-list output");
            }
            valid
        })
        .map(CommitRef::new)
        .collect()
}

fn is_object_id(s: &str) -> bool {
    (7..=64).contains(&s.len()) && s.chars().all(|c| c.is_ascii_hexdigit())
}

/// Ask git for the commits on the temporary branch missing from the target
pub fn plan_replay(
    gateway: &dyn VcsGateway,
    progress: &dyn ProgressCallback,
    ctx: &RunContext,
) -> Result<ReplayPlan> {
    progress.on_phase(Phase::Planning);
    let output = gateway.rev_list_range(&ctx.target_branch, &ctx.temp_branch)?;
    let commits = parse_commit_list(&output);
    debug!(count = commits.len(), "planned replay");
    Ok(ReplayPlan { commits })
}
