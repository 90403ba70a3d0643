//! patchbay - land a batch of patch files on a protected branch

mod cli;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use cli::style::Stylize;
use cli::{CommandContext, RunOptions, run_config, run_patchbay};
use patchbay::config::ConfigFile;
use patchbay::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "patchbay")]
#[command(about = "Apply a batch of patches on a scratch branch, then replay them onto a protected branch with per-commit review")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the repository (defaults to current directory)
    #[arg(short = 'C', long, global = true, default_value = ".")]
    path: PathBuf,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Args)]
struct RunArgs {
    /// Branch to replay the commits onto [default: main]
    #[arg(long)]
    target: Option<String>,

    /// Scratch branch the patches are applied on [default: patchbay/incoming]
    #[arg(long)]
    temp_branch: Option<String>,

    /// Directory holding the patch files [default: patches]
    #[arg(long)]
    patches: Option<PathBuf>,

    /// Filename suffix of patch files [default: .patch]
    #[arg(long)]
    suffix: Option<String>,

    /// Show the branches and patches without changing anything
    #[arg(long)]
    dry_run: bool,

    /// Preview the batch and ask for confirmation before running
    #[arg(long)]
    confirm: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the effective configuration
    Config {
        /// Write a config file with the defaults into the repository
        #[arg(long)]
        init: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            anstream::eprintln!("{} {e:#}", "error:".error());
            if e.downcast_ref::<Error>().is_some_and(Error::is_precondition) {
                anstream::eprintln!("{}", "Nothing was changed.".muted());
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<u8> {
    let overrides = cli.run.overrides()?;
    let ctx = CommandContext::new(&cli.path, overrides)?;

    match cli.command {
        Some(Commands::Config { init }) => {
            run_config(&ctx, init)?;
            Ok(0)
        }
        None => {
            let options = RunOptions {
                dry_run: cli.run.dry_run,
                confirm: cli.run.confirm,
            };
            let code = run_patchbay(&ctx, &options)?;
            Ok(u8::try_from(code).unwrap_or(1))
        }
    }
}

impl RunArgs {
    /// Flags as the top config layer; `--patches` is relative to the cwd
    fn overrides(&self) -> anyhow::Result<ConfigFile> {
        let patch_dir = match &self.patches {
            Some(dir) if dir.is_relative() => Some(
                std::env::current_dir()
                    .context("failed to read the current directory")?
                    .join(dir),
            ),
            other => other.clone(),
        };

        Ok(ConfigFile {
            target_branch: self.target.clone(),
            temp_branch: self.temp_branch.clone(),
            patch_dir,
            patch_suffix: self.suffix.clone(),
            ..ConfigFile::default()
        })
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init()
        .ok();
}
