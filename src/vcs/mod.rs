//! Gateway to the git executable
//!
//! [`VcsGateway`] is the only place a process is spawned. It runs one git
//! subcommand and hands back exit status and output without interpreting
//! them. [`GitCommands`] layers the typed operations the workflow needs on
//! top of any gateway, deciding per operation whether a non-zero exit is an
//! error or an expected answer.

mod commands;

pub use commands::GitCommands;

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Raw result of one git invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Process exit code (`-1` if terminated by a signal)
    pub status: i32,
    /// Captured stdout
    pub stdout: String,
    /// Captured stderr
    pub stderr: String,
}

impl CommandOutput {
    /// Successful output with the given stdout
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            status: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Failed output with the given stderr
    pub fn failed(stderr: impl Into<String>) -> Self {
        Self {
            status: 1,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Whether the command exited zero
    pub const fn success(&self) -> bool {
        self.status == 0
    }

    /// Git's explanation of what happened: stderr, or stdout if stderr is empty
    pub fn detail(&self) -> &str {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim()
        } else {
            stderr
        }
    }

    /// Turn a non-zero exit into [`Error::Git`]
    pub fn check(self, command: &str) -> Result<Self> {
        if self.success() {
            Ok(self)
        } else {
            Err(Error::Git {
                command: command.to_string(),
                stderr: self.stderr.trim().to_string(),
            })
        }
    }
}

/// Synchronous interface to the version-control engine
///
/// Implementations run `command` (a git subcommand such as `am` or
/// `cherry-pick`) with `args` and return its output. A non-zero exit is data,
/// not an error; only failing to run the command at all is an `Err`.
pub trait VcsGateway {
    /// Run one subcommand to completion
    fn execute(&self, command: &str, args: &[&str]) -> Result<CommandOutput>;
}

/// Gateway backed by the `git` executable
#[derive(Debug, Clone)]
pub struct GitGateway {
    program: PathBuf,
    repo_dir: PathBuf,
}

impl GitGateway {
    /// Gateway running `git` inside `repo_dir`
    pub fn new(repo_dir: &Path) -> Self {
        Self {
            program: PathBuf::from("git"),
            repo_dir: repo_dir.to_path_buf(),
        }
    }

    /// Use a different git executable
    #[must_use]
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }
}

impl VcsGateway for GitGateway {
    fn execute(&self, command: &str, args: &[&str]) -> Result<CommandOutput> {
        debug!(command, ?args, "running git");

        let output = Command::new(&self.program)
            .arg("-C")
            .arg(&self.repo_dir)
            .arg(command)
            .args(args)
            .output()?;

        let result = CommandOutput {
            status: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(command, status = result.status, "git finished");

        Ok(result)
    }
}
