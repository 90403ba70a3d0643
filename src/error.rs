//! Error types for patchbay

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while staging and replaying patches
#[derive(Debug, Error)]
pub enum Error {
    /// The operator is not on the branch the patches are meant for
    #[error("you are on '{current}', but the target branch is '{target}'; run 'git checkout {target}' first")]
    WrongBranch {
        /// Branch currently checked out (`HEAD` when detached)
        current: String,
        /// Configured target branch
        target: String,
    },

    /// The patch directory does not exist
    #[error("patch directory not found: {}", .0.display())]
    PatchDirMissing(PathBuf),

    /// The patch directory exists but holds no patch files
    #[error("no patch files found in {} (looking for *{suffix})", dir.display())]
    NoPatches {
        /// Directory that was searched
        dir: PathBuf,
        /// Filename suffix that was matched
        suffix: String,
    },

    /// A branch with the temporary branch's name already exists
    #[error("temporary branch '{0}' already exists; inspect it, then delete it with 'git branch -D {0}'")]
    TempBranchExists(String),

    /// A git command exited non-zero where success was required
    #[error("git {command} failed: {stderr}")]
    Git {
        /// The git subcommand (and arguments) that failed
        command: String,
        /// Trimmed stderr of the failed command
        stderr: String,
    },

    /// Spawning a process or touching the filesystem failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be read or parsed
    #[error("config error: {0}")]
    Config(String),

    /// Reading operator input failed
    #[error("prompt error: {0}")]
    Prompt(String),

    /// Internal invariant violated
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether this error was raised before any repository state was touched
    pub const fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::WrongBranch { .. }
                | Self::PatchDirMissing(_)
                | Self::NoPatches { .. }
                | Self::TempBranchExists(_)
        )
    }
}
