//! Operator input seam
//!
//! Every decision the workflow cannot make on its own goes through an
//! [`Operator`]: the conflict prompt, the review menu, file lists and raw
//! git command lines. The CLI answers from the terminal; tests answer from
//! a script.

use crate::error::Result;

/// The human driving the run
pub trait Operator {
    /// Show `prompt` and read one line of input, without the line ending
    ///
    /// An `Err` means input is no longer available (closed stdin, terminal
    /// error); the workflow treats it as a failure of the run.
    fn ask(&mut self, prompt: &str) -> Result<String>;

    /// Display a block of text such as command output or a diff
    fn show(&mut self, text: &str);
}

/// Normalize a menu answer for keyword matching
pub fn normalize_choice(input: &str) -> String {
    input.trim().to_ascii_lowercase()
}
