//! Real git repositories in temporary directories

#![allow(dead_code)]

use patchbay::config::ConfigFile;
use patchbay::vcs::GitGateway;
use patchbay::workflow::RunConfig;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A git repository on `main` with one initial commit
///
/// Drives the real `git` executable. The repository gets a local identity so
/// `am` and `cherry-pick` can commit on any machine.
pub struct TempGitRepo {
    dir: TempDir,
}

impl TempGitRepo {
    /// Create and initialize the repository
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let repo = Self { dir };

        repo.git(&["init", "--quiet", "-b", "main"]);
        repo.git(&["config", "user.name", "Patch Tester"]);
        repo.git(&["config", "user.email", "tester@example.com"]);
        repo.git(&["config", "commit.gpgsign", "false"]);
        repo.commit_file("README.md", "# fixture\n", "Initial commit");

        repo
    }

    /// Working tree root
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Gateway bound to this repository
    pub fn gateway(&self) -> GitGateway {
        GitGateway::new(self.path())
    }

    /// Default settings with patches read from `patch_dir`
    pub fn config(&self, patch_dir: &Path) -> RunConfig {
        ConfigFile {
            patch_dir: Some(patch_dir.to_path_buf()),
            ..ConfigFile::default()
        }
        .resolve(self.path())
    }

    /// Run git, returning the raw output
    pub fn try_git(&self, args: &[&str]) -> Output {
        Command::new("git")
            .arg("-C")
            .arg(self.path())
            .args(args)
            .output()
            .expect("spawn git")
    }

    /// Run git and return stdout, panicking on failure
    pub fn git(&self, args: &[&str]) -> String {
        let output = self.try_git(args);
        assert!(
            output.status.success(),
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    /// Write a file in the working tree
    pub fn write(&self, file: &str, content: &str) {
        fs::write(self.path().join(file), content).expect("write file");
    }

    /// Read a file from the working tree
    pub fn read(&self, file: &str) -> String {
        fs::read_to_string(self.path().join(file)).expect("read file")
    }

    /// Write, stage and commit a file on the current branch
    pub fn commit_file(&self, file: &str, content: &str, message: &str) {
        self.write(file, content);
        self.git(&["add", file]);
        self.git(&["commit", "--quiet", "-m", message]);
    }

    /// Create one patch file per `(file, content, message)` commit
    ///
    /// The commits are made on a throwaway branch off `main`, exported with
    /// `git format-patch` and the branch is deleted again, so the repository
    /// is back on `main` with no trace of them.
    pub fn make_patches(&self, commits: &[(&str, &str, &str)]) -> TempDir {
        let out = TempDir::new().expect("create patch dir");

        self.git(&["checkout", "--quiet", "-b", "patch-source", "main"]);
        for (file, content, message) in commits {
            self.commit_file(file, content, message);
        }
        let out_dir = out.path().to_string_lossy().into_owned();
        self.git(&["format-patch", "--quiet", "-o", &out_dir, "main..patch-source"]);
        self.git(&["checkout", "--quiet", "main"]);
        self.git(&["branch", "-D", "patch-source"]);

        out
    }

    /// Patch files in `dir`, sorted by name
    pub fn patch_files(dir: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = fs::read_dir(dir)
            .expect("read patch dir")
            .map(|entry| entry.expect("dir entry").path())
            .collect();
        files.sort();
        files
    }

    /// Currently checked-out branch
    pub fn current_branch(&self) -> String {
        self.git(&["rev-parse", "--abbrev-ref", "HEAD"]).trim().to_string()
    }

    /// Local branch names
    pub fn branches(&self) -> Vec<String> {
        self.git(&["for-each-ref", "--format=%(refname:short)", "refs/heads"])
            .lines()
            .map(String::from)
            .collect()
    }

    /// Commit subjects on `branch`, newest first
    pub fn subjects(&self, branch: &str) -> Vec<String> {
        self.git(&["log", "--format=%s", branch])
            .lines()
            .map(String::from)
            .collect()
    }

    /// Whether the index and working tree match `HEAD`
    pub fn is_clean(&self) -> bool {
        self.git(&["status", "--porcelain", "--untracked-files=no"])
            .trim()
            .is_empty()
    }
}
