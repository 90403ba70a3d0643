//! Per-commit review after a replay
//!
//! After each cherry-pick the operator gets a fixed menu and may amend the
//! new commit any number of times before moving on. This is the only point
//! where already-replayed history can change.

mod command;
mod menu;

pub use command::{CommandPolicy, DEFAULT_ALLOWED_COMMANDS, run_command_loop, split_command_line};
pub use menu::{ReviewChoice, render_menu};

use crate::error::{Error, Result};
use crate::operator::Operator;
use crate::types::CommitRef;
use crate::vcs::{GitCommands, VcsGateway};
use tracing::info;

const FILES_PROMPT: &str = "Files to add (separated by spaces)";

/// How the review of one commit ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    /// Move on to the next commit
    Advance,
    /// Stop the run
    Terminate,
}

/// Run the review menu for the just-replayed `commit` (now `HEAD`)
///
/// Loops until the operator picks continue or terminate. A git command
/// that fails inside an action is shown to the operator and the menu comes
/// back; other errors end the review.
pub fn review_commit(
    gateway: &dyn VcsGateway,
    operator: &mut dyn Operator,
    policy: &CommandPolicy,
    commit: &CommitRef,
) -> Result<ReviewDecision> {
    loop {
        operator.show(&render_menu(commit, &policy.exit_sentinel));
        let answer = operator.ask("Choose an action")?;

        match ReviewChoice::parse(&answer) {
            Some(ReviewChoice::Continue) => return Ok(ReviewDecision::Advance),
            Some(ReviewChoice::Terminate) => {
                info!(commit = %commit.id, "operator terminated the run");
                return Ok(ReviewDecision::Terminate);
            }
            Some(ReviewChoice::Amend) => {
                let result = gateway.amend_keep_message();
                report(operator, result, "Commit amended.")?;
            }
            Some(ReviewChoice::AddAndAmend) => {
                let line = operator.ask(FILES_PROMPT)?;
                let files: Vec<&str> = line.split_whitespace().collect();
                if files.is_empty() {
                    operator.show("No files given; nothing staged.");
                    continue;
                }
                let result = gateway
                    .stage(&files)
                    .and_then(|()| gateway.amend_keep_message());
                report(operator, result, &format!("Added {} and amended.", files.join(", ")))?;
            }
            Some(ReviewChoice::RunCommand) => run_command_loop(gateway, operator, policy)?,
            Some(ReviewChoice::ShowDiff) => match gateway.show_commit("HEAD") {
                Ok(diff) => operator.show(diff.trim_end()),
                Err(err) => report(operator, Err(err), "")?,
            },
            None => operator.show(&format!("Invalid choice: '{}'", answer.trim())),
        }
    }
}

/// Show the outcome of a menu action, keeping git failures inside the loop
fn report(operator: &mut dyn Operator, result: Result<()>, done: &str) -> Result<()> {
    match result {
        Ok(()) => {
            operator.show(done);
            Ok(())
        }
        Err(err @ Error::Git { .. }) => {
            operator.show(&err.to_string());
            Ok(())
        }
        Err(err) => Err(err),
    }
}
