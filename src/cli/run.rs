//! Run command - apply the patch batch and replay it onto the target branch

use crate::cli::context::CommandContext;
use crate::cli::{CliProgress, TerminalOperator};
use crate::cli::style::{CROSS, Stylize, arrow, check};
use anstream::println;
use dialoguer::Confirm;
use patchbay::error::{Error, Result};
use patchbay::types::{AbortPoint, RunContext, RunOutcome};
use patchbay::workflow::{Preflight, RunReport, execute_run, preflight};

/// Options for the run command
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Dry run - show what would be applied without making changes
    pub dry_run: bool,
    /// Preview the batch and prompt for confirmation before executing
    pub confirm: bool,
}

/// Run the run command, returning the process exit code
pub fn run_patchbay(ctx: &CommandContext, options: &RunOptions) -> Result<i32> {
    // =========================================================================
    // Phase 1: PREFLIGHT - Validate everything before touching the repository
    // =========================================================================

    let preflight = preflight(&ctx.gateway, &ctx.config)?;

    if options.dry_run {
        report_preview(&preflight);
        println!("{}", "Run without --dry-run to execute.".muted());
        return Ok(0);
    }

    if options.confirm {
        report_preview(&preflight);
        if !Confirm::new()
            .with_prompt("Proceed?")
            .default(true)
            .interact()
            .map_err(|e| Error::Prompt(format!("Failed to read confirmation: {e}")))?
        {
            println!("{}", "Aborted".muted());
            return Ok(0);
        }
    }

    // =========================================================================
    // Phase 2: EXECUTE - Apply, replay, restore
    // =========================================================================

    let mut operator = TerminalOperator;
    let progress = CliProgress::new();
    let report = execute_run(
        &ctx.gateway,
        &mut operator,
        &progress,
        &ctx.config,
        &preflight,
    )?;

    print_run_summary(&report, &preflight.ctx);

    Ok(report.exit_code())
}

/// Show the branches and patches a run would use
fn report_preview(preflight: &Preflight) {
    let ctx = &preflight.ctx;
    println!("{}:", "Patch batch".emphasis());
    println!();
    println!(
        "  {} {} {} {}",
        "Apply onto".muted(),
        ctx.temp_branch.accent(),
        "forked from".muted(),
        ctx.target_branch.accent()
    );
    println!(
        "  {} {}",
        "Patches from".muted(),
        ctx.patch_dir.display().to_string().accent()
    );
    println!();
    for patch in &preflight.patches {
        println!("  {}. {}", patch.position, patch.name);
    }
    println!();
}

/// Print the outcome, next steps and cleanup status
fn print_run_summary(report: &RunReport, ctx: &RunContext) {
    println!();
    match &report.outcome {
        RunOutcome::Success => {
            println!(
                "{} {} commit(s) landed on {}",
                check(),
                report.replayed.len().accent(),
                ctx.target_branch.accent()
            );
        }
        RunOutcome::AbortedByOperator(AbortPoint::PatchConflict { patch }) => {
            println!(
                "{} Aborted while applying {}",
                CROSS.warn(),
                patch.name.accent()
            );
        }
        RunOutcome::AbortedByOperator(AbortPoint::Review { commit }) => {
            println!(
                "{} Stopped after reviewing {}; {} commit(s) landed on {}",
                "■".warn(),
                commit.short_id().accent(),
                report.replayed.len().accent(),
                ctx.target_branch.accent()
            );
        }
        RunOutcome::Failed(reason) => {
            println!("{} {}", CROSS.error(), reason);
        }
    }

    let skipped: Vec<&str> = report
        .applied
        .skipped()
        .map(|patch| patch.name.as_str())
        .collect();
    if !skipped.is_empty() {
        println!("   Skipped: {}", skipped.join(", ").warn());
    }

    if let Some(failure) = &report.replay_failure {
        println!(
            "   {} {} could not be cherry-picked onto {}",
            "Conflict:".warn(),
            failure.commit.id.accent(),
            ctx.target_branch.accent()
        );
        for line in failure.detail.lines() {
            println!("      {}", line.muted());
        }
        println!();
        println!("{}", "To finish by hand:".emphasis());
        for command in &failure.fixups {
            println!("  {} {command}", arrow());
        }
    }

    println!();
    if report.restore.is_clean() {
        println!(
            "{}",
            format!(
                "Cleaned up: on '{}', '{}' deleted",
                ctx.original_branch, ctx.temp_branch
            )
            .muted()
        );
    } else {
        for failure in report.restore.failures() {
            println!("{}", format!("⚠️  Cleanup incomplete: {failure}").warn());
        }
    }
}
