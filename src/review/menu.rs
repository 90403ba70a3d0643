//! Review menu: choices and rendering

use crate::operator::normalize_choice;
use crate::types::CommitRef;

/// An entry of the review menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewChoice {
    /// Keep the commit and move on
    Continue,
    /// Amend with whatever is staged, keeping the message
    Amend,
    /// Stage operator-named files, then amend
    AddAndAmend,
    /// Enter the git command sub-loop
    RunCommand,
    /// Show the commit's changes
    ShowDiff,
    /// Stop the run
    Terminate,
}

impl ReviewChoice {
    /// All choices in menu order
    pub const ALL: [Self; 6] = [
        Self::Continue,
        Self::Amend,
        Self::AddAndAmend,
        Self::RunCommand,
        Self::ShowDiff,
        Self::Terminate,
    ];

    /// Keyword the operator types
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Continue => "continue",
            Self::Amend => "amend",
            Self::AddAndAmend => "add",
            Self::RunCommand => "run",
            Self::ShowDiff => "diff",
            Self::Terminate => "terminate",
        }
    }

    const fn description(self) -> &'static str {
        match self {
            Self::Continue => "keep this commit and replay the next one",
            Self::Amend => "amend the commit with staged changes, keeping its message",
            Self::AddAndAmend => "stage files, then amend keeping the message",
            Self::RunCommand => "run git commands",
            Self::ShowDiff => "show the commit's changes",
            Self::Terminate => "stop here, restore branches and exit",
        }
    }

    /// Parse a keyword or menu number, ignoring case and surrounding whitespace
    pub fn parse(input: &str) -> Option<Self> {
        let answer = normalize_choice(input);
        Self::ALL.into_iter().enumerate().find_map(|(i, choice)| {
            (answer == choice.keyword() || answer == (i + 1).to_string()).then_some(choice)
        })
    }
}

/// Render the menu shown after `commit` was replayed
pub fn render_menu(commit: &CommitRef, exit_sentinel: &str) -> String {
    let mut out = format!("Review {commit}\n");
    for (i, choice) in ReviewChoice::ALL.into_iter().enumerate() {
        let description = if choice == ReviewChoice::RunCommand {
            format!("{} (type '{exit_sentinel}' to return)", choice.description())
        } else {
            choice.description().to_string()
        };
        out.push_str(&format!(
            "  {}) {:<10} {description}\n",
            i + 1,
            choice.keyword()
        ));
    }
    out
}
