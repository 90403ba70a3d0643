//! Terminal operator

use crate::cli::style::Stylize;
use anstream::{print, println};
use dialoguer::Input;
use patchbay::error::{Error, Result};
use patchbay::operator::Operator;
use std::io::{BufRead, IsTerminal, Write};

/// Reads answers from the terminal
///
/// Uses a `dialoguer` prompt when stdin is a terminal and falls back to
/// plain line reads otherwise, so answers can be piped in.
#[derive(Debug, Default)]
pub struct TerminalOperator;

impl Operator for TerminalOperator {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        if std::io::stdin().is_terminal() {
            return Input::<String>::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
                .map_err(|e| Error::Prompt(format!("failed to read answer: {e}")));
        }

        print!("{}: ", prompt.emphasis());
        std::io::stdout().flush()?;

        let mut line = String::new();
        if std::io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(Error::Prompt("input closed".to_string()));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn show(&mut self, text: &str) {
        println!("{text}");
    }
}
