//! Typed git operations on top of a [`VcsGateway`]

use super::{CommandOutput, VcsGateway};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Git operations used by the apply/replay/review stages
///
/// Implemented for every [`VcsGateway`], including trait objects. Methods
/// returning `bool` or [`CommandOutput`] tolerate a non-zero exit and leave
/// the verdict to the caller; the rest turn it into [`Error::Git`].
pub trait GitCommands: VcsGateway {
    /// Top-level directory of the working tree
    fn repo_root(&self) -> Result<PathBuf> {
        let out = self
            .execute("rev-parse", &["--show-toplevel"])?
            .check("rev-parse --show-toplevel")?;
        Ok(PathBuf::from(out.stdout.trim()))
    }

    /// Git directory shared by every worktree of the repository
    ///
    /// Git may print it relative to the directory the command ran in.
    fn git_common_dir(&self) -> Result<PathBuf> {
        let out = self
            .execute("rev-parse", &["--git-common-dir"])?
            .check("rev-parse --git-common-dir")?;
        Ok(PathBuf::from(out.stdout.trim()))
    }

    /// Name of the checked-out branch, `None` when `HEAD` is detached or
    /// cannot be resolved
    fn current_branch(&self) -> Result<Option<String>> {
        let out = self.execute("rev-parse", &["--abbrev-ref", "HEAD"])?;
        if !out.success() {
            return Ok(None);
        }
        let name = out.stdout.trim();
        if name.is_empty() || name == "HEAD" {
            return Ok(None);
        }
        Ok(Some(name.to_string()))
    }

    /// Whether a local branch named `name` exists
    fn branch_exists(&self, name: &str) -> Result<bool> {
        let refname = format!("refs/heads/{name}");
        let out = self.execute("rev-parse", &["--verify", "--quiet", &refname])?;
        Ok(out.success())
    }

    /// Create `name` from `from` and check it out
    fn create_branch(&self, name: &str, from: &str) -> Result<()> {
        self.execute("checkout", &["-b", name, from])?
            .check(&format!("checkout -b {name} {from}"))?;
        Ok(())
    }

    /// Check out an existing branch
    fn checkout(&self, name: &str) -> Result<()> {
        self.execute("checkout", &[name])?
            .check(&format!("checkout {name}"))?;
        Ok(())
    }

    /// Delete a branch even if it is not merged
    fn delete_branch_force(&self, name: &str) -> Result<()> {
        self.execute("branch", &["-D", name])?
            .check(&format!("branch -D {name}"))?;
        Ok(())
    }

    /// Apply a mailbox patch with `git am`
    ///
    /// `git am` takes the author from the patch's `From:` header, sign-off
    /// or not. A failed attempt leaves an `am` session in progress.
    fn apply_patch(&self, path: &Path, extra_args: &[String]) -> Result<CommandOutput> {
        let path = path.to_string_lossy();
        let mut args: Vec<&str> = extra_args.iter().map(String::as_str).collect();
        args.push(&path);
        self.execute("am", &args)
    }

    /// Resume the in-progress `am` session after the operator staged fixes
    fn apply_continue(&self) -> Result<CommandOutput> {
        self.execute("am", &["--continue"])
    }

    /// Drop the patch the `am` session is stuck on
    fn apply_skip(&self) -> Result<()> {
        self.execute("am", &["--skip"])?.check("am --skip")?;
        Ok(())
    }

    /// Abandon the in-progress `am` session
    fn apply_abort(&self) -> Result<bool> {
        Ok(self.execute("am", &["--abort"])?.success())
    }

    /// Raw `rev-list --reverse base..tip` output, oldest commit first
    fn rev_list_range(&self, base: &str, tip: &str) -> Result<String> {
        let range = format!("{base}..{tip}");
        let out = self
            .execute("rev-list", &["--reverse", &range])?
            .check(&format!("rev-list --reverse {range}"))?;
        Ok(out.stdout)
    }

    /// First line of a commit's message
    fn commit_subject(&self, id: &str) -> Result<String> {
        let out = self
            .execute("log", &["-1", "--format=%s", id])?
            .check(&format!("log -1 {id}"))?;
        Ok(out.stdout.trim().to_string())
    }

    /// Cherry-pick one commit onto the current branch
    fn cherry_pick(&self, id: &str) -> Result<CommandOutput> {
        self.execute("cherry-pick", &[id])
    }

    /// Amend `HEAD` with whatever is staged, keeping the message
    fn amend_keep_message(&self) -> Result<()> {
        self.execute("commit", &["--amend", "--no-edit"])?
            .check("commit --amend --no-edit")?;
        Ok(())
    }

    /// Stage the given paths
    fn stage(&self, files: &[&str]) -> Result<()> {
        if files.is_empty() {
            return Err(Error::Internal("no files to stage".to_string()));
        }
        let mut args = vec!["--"];
        args.extend_from_slice(files);
        self.execute("add", &args)?
            .check(&format!("add {}", files.join(" ")))?;
        Ok(())
    }

    /// Full changeset of a revision
    fn show_commit(&self, rev: &str) -> Result<String> {
        let out = self.execute("show", &[rev])?.check(&format!("show {rev}"))?;
        Ok(out.stdout)
    }

    /// Run an operator-supplied command line; `args[0]` is the subcommand
    fn run_raw(&self, args: &[&str]) -> Result<CommandOutput> {
        let Some((command, rest)) = args.split_first() else {
            return Err(Error::Internal("empty git command".to_string()));
        };
        self.execute(command, rest)
    }
}

impl<T: VcsGateway + ?Sized> GitCommands for T {}
