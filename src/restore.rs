//! Return the repository to the branch the run started on
//!
//! Restore never fails the run. Each step's result is recorded in a
//! [`RestoreReport`] so the caller can warn about whatever was left behind.

use crate::progress::{Phase, ProgressCallback};
use crate::types::RunContext;
use crate::vcs::{GitCommands, VcsGateway};
use tracing::{info, warn};

/// Outcome of one restore step; the error explains what was left behind
pub type StepResult = std::result::Result<(), String>;

/// What restore managed to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreReport {
    /// Checking out the original branch
    pub checkout: StepResult,
    /// Deleting the temporary branch
    pub delete: StepResult,
}

impl RestoreReport {
    /// Whether both steps succeeded
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.checkout.is_ok() && self.delete.is_ok()
    }

    /// Failure messages, one per failed step
    pub fn failures(&self) -> Vec<&str> {
        [&self.checkout, &self.delete]
            .into_iter()
            .filter_map(|step| step.as_ref().err().map(String::as_str))
            .collect()
    }
}

/// Check out the original branch, then force-delete the temporary branch
///
/// The checkout is skipped when the original branch is already checked out,
/// and the delete when the temporary branch no longer exists. The delete is
/// attempted even if the checkout failed.
pub fn restore(
    gateway: &dyn VcsGateway,
    progress: &dyn ProgressCallback,
    ctx: &RunContext,
) -> RestoreReport {
    progress.on_phase(Phase::Restoring);

    let current = gateway.current_branch().ok().flatten();
    let checkout = if current.as_deref() == Some(ctx.original_branch.as_str()) {
        Ok(())
    } else {
        gateway.checkout(&ctx.original_branch).map_err(|e| {
            format!(
                "could not return to '{}' ({e}); run 'git checkout {}'",
                ctx.original_branch, ctx.original_branch
            )
        })
    };

    let delete = match gateway.branch_exists(&ctx.temp_branch) {
        Ok(false) => Ok(()),
        Ok(true) => gateway.delete_branch_force(&ctx.temp_branch).map_err(|e| {
            format!(
                "could not delete '{}' ({e}); run 'git branch -D {}'",
                ctx.temp_branch, ctx.temp_branch
            )
        }),
        Err(e) => Err(format!(
            "could not check for '{}' ({e}); run 'git branch -D {}' if it still exists",
            ctx.temp_branch, ctx.temp_branch
        )),
    };

    let report = RestoreReport { checkout, delete };
    if report.is_clean() {
        info!(branch = %ctx.original_branch, "restored original branch");
    } else {
        for failure in report.failures() {
            warn!("{failure}");
        }
    }
    report
}
