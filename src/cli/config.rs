//! Config command - show or create the repository configuration

use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, check};
use anstream::println;
use patchbay::config::{ConfigFile, config_path, save_config_file, user_config_path};
use patchbay::error::{Error, Result};

/// Print the effective configuration, or write a default config file
pub fn run_config(ctx: &CommandContext, init: bool) -> Result<()> {
    let repo_path = config_path(&ctx.git_dir);

    if init {
        if repo_path.exists() {
            println!(
                "{}",
                format!("Config already exists at {}", repo_path.display()).muted()
            );
            return Ok(());
        }
        save_config_file(&repo_path, &ConfigFile::defaults())?;
        println!("{} Wrote {}", check(), repo_path.display().to_string().accent());
        return Ok(());
    }

    println!("{}", "Config files (later wins):".emphasis());
    if let Some(user_path) = user_config_path() {
        print_source(&user_path);
    }
    print_source(&repo_path);
    println!();

    let effective = ConfigFile::defaults().layer(ctx.layers.clone());
    let text = toml::to_string_pretty(&effective)
        .map_err(|e| Error::Config(format!("failed to serialize config: {e}")))?;
    println!("{}", "Effective settings:".emphasis());
    println!("{text}");

    Ok(())
}

fn print_source(path: &std::path::Path) {
    let state = if path.exists() { "found" } else { "not found" };
    println!("  {} {}", path.display(), format!("({state})").muted());
}
