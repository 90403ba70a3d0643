//! Terminal progress output

use crate::cli::style::{CROSS, Stylize, check, spinner_style};
use anstream::println;
use indicatif::ProgressBar;
use patchbay::progress::{Phase, ProgressCallback, commit_line, patch_line};
use patchbay::types::{CommitRef, PatchArtifact, PatchStatus};
use std::cell::RefCell;
use std::time::Duration;

/// Prints run progress to stdout
///
/// The range query runs under a spinner, which is cleared as soon as the
/// next phase starts.
#[derive(Default)]
pub struct CliProgress {
    spinner: RefCell<Option<ProgressBar>>,
}

impl CliProgress {
    /// Create a progress printer
    pub fn new() -> Self {
        Self::default()
    }

    fn finish_spinner(&self) {
        if let Some(spinner) = self.spinner.borrow_mut().take() {
            spinner.finish_and_clear();
        }
    }
}

impl ProgressCallback for CliProgress {
    fn on_phase(&self, phase: Phase) {
        self.finish_spinner();
        match phase {
            Phase::Planning => {
                let spinner = ProgressBar::new_spinner();
                spinner.set_style(spinner_style());
                spinner.set_message(phase.to_string());
                spinner.enable_steady_tick(Duration::from_millis(80));
                *self.spinner.borrow_mut() = Some(spinner);
            }
            Phase::Applying | Phase::Replaying => {
                println!();
                println!("{}", phase.to_string().emphasis());
            }
            Phase::Restoring => println!("{}", phase.to_string().muted()),
        }
    }

    fn on_patch_start(&self, patch: &PatchArtifact, total: usize) {
        println!("{}", patch_line(patch, total));
    }

    fn on_patch_conflict(&self, patch: &PatchArtifact, detail: &str) {
        println!("  {} {} did not apply", CROSS.warn(), patch.name.accent());
        for line in detail.lines() {
            println!("    {}", line.muted());
        }
    }

    fn on_patch_done(&self, _patch: &PatchArtifact, status: PatchStatus) {
        match status {
            PatchStatus::Applied | PatchStatus::Resolved => println!("  {} {status}", check()),
            PatchStatus::Skipped => println!("  {}", status.to_string().warn()),
        }
    }

    fn on_commit_start(&self, commit: &CommitRef, index: usize, total: usize) {
        println!("{}", commit_line(commit, index, total));
    }

    fn on_message(&self, message: &str) {
        println!("{}", message.muted());
    }

    fn on_warning(&self, message: &str) {
        println!("{}", format!("⚠️  {message}").warn());
    }
}
