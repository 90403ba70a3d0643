//! Persistence for configuration in `<git-dir>/patchbay/` and the user
//! config directory.

use super::ConfigFile;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory name for patchbay metadata.
const PATCHBAY_DIR: &str = "patchbay";

/// Filename for configuration.
const CONFIG_FILE: &str = "config.toml";

/// Path to the repository's config file inside `git_dir`.
///
/// `git_dir` is the common git directory, so every linked worktree of a
/// repository reads the same file.
pub fn config_path(git_dir: &Path) -> PathBuf {
    git_dir.join(PATCHBAY_DIR).join(CONFIG_FILE)
}

/// Path to the user's config file, if the platform has a config directory.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(PATCHBAY_DIR).join(CONFIG_FILE))
}

/// Load one config layer from disk.
///
/// Returns an empty layer if the file doesn't exist.
pub fn load_config_file(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

    let layer: ConfigFile = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))?;

    debug!(path = %path.display(), "loaded config");
    Ok(layer)
}

/// Load the user layer and the repository layer, repository on top.
pub fn load_layered(git_dir: &Path) -> Result<ConfigFile> {
    let user = match user_config_path() {
        Some(path) => load_config_file(&path)?,
        None => ConfigFile::default(),
    };
    let repo = load_config_file(&config_path(git_dir))?;
    Ok(user.layer(repo))
}

/// Save a config layer to disk.
///
/// Creates the parent directory if it doesn't exist.
pub fn save_config_file(path: &Path, layer: &ConfigFile) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.exists() {
            fs::create_dir_all(dir)
                .map_err(|e| Error::Config(format!("failed to create {}: {e}", dir.display())))?;
        }
    }

    let content = toml::to_string_pretty(layer)
        .map_err(|e| Error::Config(format!("failed to serialize config: {e}")))?;

    // Add header comment
    let content_with_header = format!(
        "# patchbay configuration\n# Command-line flags override these values\n\n{content}"
    );

    fs::write(path, content_with_header)
        .map_err(|e| Error::Config(format!("failed to write {}: {e}", path.display())))?;

    Ok(())
}
