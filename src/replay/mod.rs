//! Replay engine
//!
//! Two steps, matching the apply stage's plan/execute split:
//! 1. Plan - list the commits on the temporary branch missing from the
//!    target branch, oldest first
//! 2. Execute - cherry-pick each onto the target branch, with a review after
//!    every replay

mod execute;
mod plan;

pub use execute::{ReplayOutcome, fixup_commands, replay_commits};
pub use plan::{ReplayPlan, parse_commit_list, plan_replay};
