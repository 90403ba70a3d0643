//! Layered configuration
//!
//! Settings come from, lowest precedence first: built-in defaults, the user
//! config file, the repository config file, command-line flags. Every layer
//! is a [`ConfigFile`] with optional fields; [`ConfigFile::layer`] stacks
//! them and [`ConfigFile::resolve`] fills the gaps with defaults.

mod storage;

pub use storage::{
    config_path, load_config_file, load_layered, save_config_file, user_config_path,
};

use crate::patches::DEFAULT_SUFFIX;
use crate::review::{CommandPolicy, DEFAULT_ALLOWED_COMMANDS};
use crate::workflow::RunConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default target branch
pub const DEFAULT_TARGET_BRANCH: &str = "main";

/// Default temporary branch
pub const DEFAULT_TEMP_BRANCH: &str = "patchbay/incoming";

/// Default patch directory, relative to the repository root
pub const DEFAULT_PATCH_DIR: &str = "patches";

/// Default extra arguments for `git am`
pub const DEFAULT_APPLY_ARGS: &[&str] = &["--3way"];

/// Default input that leaves the review command sub-loop
pub const DEFAULT_EXIT_SENTINEL: &str = "exit";

/// One configuration layer; unset fields defer to lower layers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Branch the commits are replayed onto
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_branch: Option<String>,
    /// Scratch branch for applying patches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_branch: Option<String>,
    /// Directory holding the patch files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch_dir: Option<PathBuf>,
    /// Filename suffix of patch files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch_suffix: Option<String>,
    /// Extra arguments for `git am`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply_args: Option<Vec<String>>,
    /// Review menu settings
    pub review: ReviewSection,
}

/// `[review]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReviewSection {
    /// Git subcommands the command sub-loop may run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_commands: Option<Vec<String>>,
    /// Let the command sub-loop run any git subcommand
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_any_command: Option<bool>,
    /// Input that leaves the command sub-loop
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_sentinel: Option<String>,
}

impl ConfigFile {
    /// A layer with every field set to its default
    pub fn defaults() -> Self {
        Self {
            target_branch: Some(DEFAULT_TARGET_BRANCH.to_string()),
            temp_branch: Some(DEFAULT_TEMP_BRANCH.to_string()),
            patch_dir: Some(PathBuf::from(DEFAULT_PATCH_DIR)),
            patch_suffix: Some(DEFAULT_SUFFIX.to_string()),
            apply_args: Some(to_strings(DEFAULT_APPLY_ARGS)),
            review: ReviewSection {
                allowed_commands: Some(to_strings(DEFAULT_ALLOWED_COMMANDS)),
                allow_any_command: Some(false),
                exit_sentinel: Some(DEFAULT_EXIT_SENTINEL.to_string()),
            },
        }
    }

    /// Stack `over` on top of `self`; fields set in `over` win
    #[must_use]
    pub fn layer(self, over: Self) -> Self {
        Self {
            target_branch: over.target_branch.or(self.target_branch),
            temp_branch: over.temp_branch.or(self.temp_branch),
            patch_dir: over.patch_dir.or(self.patch_dir),
            patch_suffix: over.patch_suffix.or(self.patch_suffix),
            apply_args: over.apply_args.or(self.apply_args),
            review: ReviewSection {
                allowed_commands: over.review.allowed_commands.or(self.review.allowed_commands),
                allow_any_command: over
                    .review
                    .allow_any_command
                    .or(self.review.allow_any_command),
                exit_sentinel: over.review.exit_sentinel.or(self.review.exit_sentinel),
            },
        }
    }

    /// Fill unset fields with defaults and anchor `patch_dir` at `repo_root`
    pub fn resolve(self, repo_root: &Path) -> RunConfig {
        let merged = Self::defaults().layer(self);
        let patch_dir = merged
            .patch_dir
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PATCH_DIR));
        let patch_dir = if patch_dir.is_absolute() {
            patch_dir
        } else {
            repo_root.join(patch_dir)
        };

        RunConfig {
            target_branch: merged
                .target_branch
                .unwrap_or_else(|| DEFAULT_TARGET_BRANCH.to_string()),
            temp_branch: merged
                .temp_branch
                .unwrap_or_else(|| DEFAULT_TEMP_BRANCH.to_string()),
            patch_dir,
            patch_suffix: merged
                .patch_suffix
                .unwrap_or_else(|| DEFAULT_SUFFIX.to_string()),
            apply_args: merged
                .apply_args
                .unwrap_or_else(|| to_strings(DEFAULT_APPLY_ARGS)),
            review: CommandPolicy {
                allowed: merged
                    .review
                    .allowed_commands
                    .unwrap_or_else(|| to_strings(DEFAULT_ALLOWED_COMMANDS)),
                allow_any: merged.review.allow_any_command.unwrap_or(false),
                exit_sentinel: merged
                    .review
                    .exit_sentinel
                    .unwrap_or_else(|| DEFAULT_EXIT_SENTINEL.to_string()),
            },
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}
