//! CLI command implementations

pub mod config;
pub mod context;
pub mod progress;
pub mod prompt;
pub mod run;
pub mod style;

pub use config::run_config;
pub use context::CommandContext;
pub use progress::CliProgress;
pub use prompt::TerminalOperator;
pub use run::{RunOptions, run_patchbay};
