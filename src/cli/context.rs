//! Shared command context for CLI commands
//!
//! Extracts common setup code shared by the run and config commands.

use patchbay::config::{ConfigFile, load_layered};
use patchbay::error::Result;
use patchbay::vcs::{GitCommands, GitGateway};
use patchbay::workflow::RunConfig;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Shared context for CLI commands
///
/// This struct encapsulates the common setup:
/// - Locating the repository root and its common git directory
/// - Creating the git gateway for it
/// - Loading user and repository config and applying CLI overrides
pub struct CommandContext {
    /// Gateway bound to the repository root
    pub gateway: GitGateway,
    /// Git directory shared by all worktrees; holds the repository config
    pub git_dir: PathBuf,
    /// Config layers merged with CLI overrides, before defaults are applied
    pub layers: ConfigFile,
    /// Effective settings for a run
    pub config: RunConfig,
}

impl CommandContext {
    /// Create a new command context
    ///
    /// Fails if `path` is not inside a git working tree or a config file
    /// cannot be parsed.
    pub fn new(path: &Path, overrides: ConfigFile) -> Result<Self> {
        let repo_root = GitGateway::new(path).repo_root()?;
        let gateway = GitGateway::new(&repo_root);
        let git_dir = repo_root.join(gateway.git_common_dir()?);

        let layers = load_layered(&git_dir)?.layer(overrides);
        let config = layers.clone().resolve(&repo_root);
        debug!(?config, "effective configuration");

        Ok(Self {
            gateway,
            git_dir,
            layers,
            config,
        })
    }
}
