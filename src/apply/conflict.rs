//! Conflict resolution loop for a patch that failed to apply

use crate::error::Result;
use crate::operator::{Operator, normalize_choice};
use crate::progress::ProgressCallback;
use crate::types::PatchArtifact;
use crate::vcs::{GitCommands, VcsGateway};
use tracing::info;

const PROMPT: &str = "Patch failed to apply. Resolve and stage the conflicts, then choose [continue/skip/abort]";

const USAGE: &str = "Please answer one of:
  continue  resume 'git am' with the conflict resolutions you staged
  skip      drop this patch and move on to the next one
  abort     stop, return to the original branch and delete the temporary branch";

/// Operator answer at the conflict prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictChoice {
    /// Resume the `am` session
    Continue,
    /// Drop the current patch
    Skip,
    /// Stop the whole run
    Abort,
}

impl ConflictChoice {
    /// Parse an answer, ignoring case and surrounding whitespace
    pub fn parse(input: &str) -> Option<Self> {
        match normalize_choice(input).as_str() {
            "continue" => Some(Self::Continue),
            "skip" => Some(Self::Skip),
            "abort" => Some(Self::Abort),
            _ => None,
        }
    }
}

/// How a conflicted patch was settled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictResolution {
    /// `git am --continue` succeeded with the operator's fixes
    Resolved,
    /// The patch was dropped
    Skipped,
    /// The operator stopped the run; the `am` session was abandoned
    Aborted,
}

/// Ask the operator what to do about `patch` until the conflict is settled
///
/// A failed `continue` re-prompts, as does an unrecognized answer. Only
/// gateway or input failures end the loop with an error.
pub fn resolve_conflict(
    gateway: &dyn VcsGateway,
    operator: &mut dyn Operator,
    progress: &dyn ProgressCallback,
    patch: &PatchArtifact,
) -> Result<ConflictResolution> {
    loop {
        let answer = operator.ask(PROMPT)?;
        match ConflictChoice::parse(&answer) {
            Some(ConflictChoice::Continue) => {
                let out = gateway.apply_continue()?;
                if out.success() {
                    info!(patch = %patch.name, "conflict resolved");
                    return Ok(ConflictResolution::Resolved);
                }
                progress.on_warning(&format!(
                    "{} still does not apply: {}",
                    patch.name,
                    out.detail()
                ));
            }
            Some(ConflictChoice::Skip) => {
                gateway.apply_skip()?;
                info!(patch = %patch.name, "patch skipped");
                return Ok(ConflictResolution::Skipped);
            }
            Some(ConflictChoice::Abort) => {
                if !gateway.apply_abort()? {
                    progress.on_warning("'git am --abort' failed; the am session may still be in progress");
                }
                info!(patch = %patch.name, "aborted at conflict prompt");
                return Ok(ConflictResolution::Aborted);
            }
            None => operator.show(USAGE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keywords_case_insensitive() {
        assert_eq!(ConflictChoice::parse("continue"), Some(ConflictChoice::Continue));
        assert_eq!(ConflictChoice::parse(" SKIP "), Some(ConflictChoice::Skip));
        assert_eq!(ConflictChoice::parse("Abort\n"), Some(ConflictChoice::Abort));
    }

    #[test]
    fn test_parse_rejects_other_input() {
        assert_eq!(ConflictChoice::parse(""), None);
        assert_eq!(ConflictChoice::parse("c"), None);
        assert_eq!(ConflictChoice::parse("continue please"), None);
    }
}
