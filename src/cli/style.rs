//! Terminal styling helpers
//!
//! Colors are applied with `owo-colors` and printed through `anstream`,
//! which strips them when stdout is not a terminal.

use indicatif::ProgressStyle;
use owo_colors::{OwoColorize, Style, Styled};

/// Check mark used in success lines
pub const CHECK: &str = "✓";

/// Cross used in failure lines
pub const CROSS: &str = "✗";

/// Semantic styles for CLI output
pub trait Stylize: OwoColorize {
    /// Bold, for headings and names
    fn emphasis(&self) -> Styled<&Self> {
        self.style(Style::new().bold())
    }

    /// Cyan, for branch names and counts
    fn accent(&self) -> Styled<&Self> {
        self.style(Style::new().cyan())
    }

    /// Dimmed, for secondary information
    fn muted(&self) -> Styled<&Self> {
        self.style(Style::new().dimmed())
    }

    /// Green
    fn success(&self) -> Styled<&Self> {
        self.style(Style::new().green())
    }

    /// Yellow
    fn warn(&self) -> Styled<&Self> {
        self.style(Style::new().yellow())
    }

    /// Bold red
    fn error(&self) -> Styled<&Self> {
        self.style(Style::new().red().bold())
    }
}

impl<T: OwoColorize> Stylize for T {}

/// Green check mark
pub fn check() -> Styled<&'static str> {
    Style::new().green().style(CHECK)
}

/// Arrow used to list next steps
pub fn arrow() -> Styled<&'static str> {
    Style::new().dimmed().style("→")
}

/// Spinner style for long-running git calls
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
}
