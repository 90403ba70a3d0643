//! Git command sub-loop of the review menu
//!
//! Operator input here is handed straight to git, so it is the one place the
//! tool runs commands it did not choose itself. Input is never passed to a
//! shell: each line is split on whitespace and run as `git <subcommand>
//! <args>`. The subcommand must be on the allow-list unless the policy
//! allows any subcommand. Global git options (`-c`, `--exec-path`, ...) are
//! refused in either case since they can reach outside git.

use crate::error::Result;
use crate::operator::Operator;
use crate::vcs::{GitCommands, VcsGateway};
use tracing::info;

/// Subcommands allowed when no list is configured
pub const DEFAULT_ALLOWED_COMMANDS: &[&str] = &[
    "status", "log", "diff", "show", "add", "rm", "restore", "reset", "commit", "mv", "stash",
];

/// Which git subcommands the review sub-loop may run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPolicy {
    /// Allowed subcommands
    pub allowed: Vec<String>,
    /// Allow every subcommand
    pub allow_any: bool,
    /// Input that leaves the sub-loop
    pub exit_sentinel: String,
}

impl Default for CommandPolicy {
    fn default() -> Self {
        Self {
            allowed: DEFAULT_ALLOWED_COMMANDS
                .iter()
                .map(ToString::to_string)
                .collect(),
            allow_any: false,
            exit_sentinel: "exit".to_string(),
        }
    }
}

impl CommandPolicy {
    /// Why `subcommand` may not run, or `None` if it may
    pub fn refusal(&self, subcommand: &str) -> Option<String> {
        if subcommand.starts_with('-') {
            return Some(format!(
                "'{subcommand}' looks like a git option; start with a subcommand such as 'status'"
            ));
        }
        if self.allow_any || self.allowed.iter().any(|a| a == subcommand) {
            return None;
        }
        Some(format!(
            "'git {subcommand}' is not allowed here (allowed: {}); set review.allow_any_command to lift this",
            self.allowed.join(", ")
        ))
    }
}

/// Split an input line into git arguments, dropping a leading `git`
pub fn split_command_line(line: &str) -> Vec<&str> {
    let mut words: Vec<&str> = line.split_whitespace().collect();
    if words.first() == Some(&"git") {
        words.remove(0);
    }
    words
}

/// Read and run git commands until the operator types the exit sentinel
pub fn run_command_loop(
    gateway: &dyn VcsGateway,
    operator: &mut dyn Operator,
    policy: &CommandPolicy,
) -> Result<()> {
    let prompt = format!("git (type '{}' to return)", policy.exit_sentinel);
    loop {
        let line = operator.ask(&prompt)?;
        if line.trim().eq_ignore_ascii_case(&policy.exit_sentinel) {
            return Ok(());
        }

        let args = split_command_line(&line);
        let Some(subcommand) = args.first() else {
            continue;
        };
        if let Some(reason) = policy.refusal(subcommand) {
            operator.show(&reason);
            continue;
        }

        info!(?args, "running operator command");
        let out = gateway.run_raw(&args)?;
        if !out.stdout.is_empty() {
            operator.show(out.stdout.trim_end());
        }
        if !out.stderr.is_empty() {
            operator.show(out.stderr.trim_end());
        }
        if !out.success() {
            operator.show(&format!("git {subcommand} exited with status {}", out.status));
        }
    }
}
