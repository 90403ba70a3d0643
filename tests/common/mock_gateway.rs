//! Scripted git gateway, operator and progress recorder for testing
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use patchbay::error::{Error, Result};
use patchbay::operator::Operator;
use patchbay::progress::{Phase, ProgressCallback};
use patchbay::types::{CommitRef, PatchArtifact, PatchStatus};
use patchbay::vcs::{CommandOutput, VcsGateway};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Mock git gateway with scripted responses
///
/// Responses are keyed by a command line prefix (`"am"`, `"am --continue"`,
/// `"rev-parse --abbrev-ref HEAD"`). The longest key that prefixes an
/// invocation wins. Each key holds a queue; the last response repeats once
/// the others are used up. Unscripted invocations succeed with empty output.
///
/// Features:
/// - Call tracking for verification
/// - Per-command response queues
/// - Spawn failure injection
#[derive(Default)]
pub struct MockGateway {
    responses: Mutex<HashMap<String, VecDeque<CommandOutput>>>,
    calls: Mutex<Vec<String>>,
    spawn_failure: Mutex<Option<String>>,
}

impl MockGateway {
    /// Create a mock with no scripted responses
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `output` for invocations starting with `key`
    pub fn on(&self, key: &str, output: CommandOutput) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .entry(key.to_string())
            .or_default()
            .push_back(output);
        self
    }

    /// Queue a successful response with `stdout`
    pub fn ok(&self, key: &str, stdout: &str) -> &Self {
        self.on(key, CommandOutput::ok(stdout))
    }

    /// Queue a failed response with `stderr`
    pub fn fail(&self, key: &str, stderr: &str) -> &Self {
        self.on(key, CommandOutput::failed(stderr))
    }

    /// Make invocations starting with `key` fail to spawn
    pub fn fail_spawn(&self, key: &str) {
        *self.spawn_failure.lock().unwrap() = Some(key.to_string());
    }

    /// Script the current branch
    pub fn on_branch(&self, name: &str) -> &Self {
        self.ok("rev-parse --abbrev-ref HEAD", &format!("{name}\n"))
    }

    /// Script whether `refs/heads/<name>` exists, one answer per check
    pub fn branch_exists(&self, name: &str, answers: &[bool]) -> &Self {
        let key = format!("rev-parse --verify --quiet refs/heads/{name}");
        for exists in answers {
            if *exists {
                self.ok(&key, "0123456789abcdef0123456789abcdef01234567\n");
            } else {
                self.on(
                    &key,
                    CommandOutput {
                        status: 1,
                        ..CommandOutput::default()
                    },
                );
            }
        }
        self
    }

    /// All invocations so far, as `"<command> <args...>"`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Invocations starting with `prefix`
    pub fn calls_starting_with(&self, prefix: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| matches_key(call, prefix))
            .collect()
    }

    /// Whether any invocation started with `prefix`
    pub fn was_called(&self, prefix: &str) -> bool {
        !self.calls_starting_with(prefix).is_empty()
    }
}

fn matches_key(line: &str, key: &str) -> bool {
    line == key || line.starts_with(&format!("{key} "))
}

impl VcsGateway for MockGateway {
    fn execute(&self, command: &str, args: &[&str]) -> Result<CommandOutput> {
        let mut line = command.to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        self.calls.lock().unwrap().push(line.clone());

        if let Some(key) = self.spawn_failure.lock().unwrap().as_deref() {
            if matches_key(&line, key) {
                return Err(Error::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "git not found",
                )));
            }
        }

        let mut responses = self.responses.lock().unwrap();
        let key = responses
            .keys()
            .filter(|key| matches_key(&line, key))
            .max_by_key(|key| key.len())
            .cloned();
        let Some(output) = key.and_then(|key| responses.get_mut(&key).map(|queue| {
            if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().cloned()
            }
        })) else {
            return Ok(CommandOutput::ok(""));
        };

        Ok(output.unwrap_or_default())
    }
}

/// Operator that answers from a script
///
/// Running out of answers is a prompt error, like a closed stdin.
#[derive(Debug, Default)]
pub struct ScriptedOperator {
    answers: VecDeque<String>,
    /// Prompts asked, in order
    pub prompts: Vec<String>,
    /// Text shown, in order
    pub shown: Vec<String>,
}

impl ScriptedOperator {
    /// Operator giving `answers` in order
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(ToString::to_string).collect(),
            ..Self::default()
        }
    }

    /// Answers not consumed yet
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    /// Whether any shown text contains `needle`
    pub fn saw(&self, needle: &str) -> bool {
        self.shown.iter().any(|text| text.contains(needle))
    }
}

impl Operator for ScriptedOperator {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        self.prompts.push(prompt.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| Error::Prompt("input closed".to_string()))
    }

    fn show(&mut self, text: &str) {
        self.shown.push(text.to_string());
    }
}

/// Progress callback that records every event as a line
#[derive(Debug, Default)]
pub struct RecordingProgress {
    events: Mutex<Vec<String>>,
}

impl RecordingProgress {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events, in order
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    /// Recorded warnings
    pub fn warnings(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| event.strip_prefix("warning: ").map(String::from))
            .collect()
    }

    fn record(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl ProgressCallback for RecordingProgress {
    fn on_phase(&self, phase: Phase) {
        self.record(format!("phase: {phase}"));
    }

    fn on_patch_start(&self, patch: &PatchArtifact, total: usize) {
        self.record(format!("patch {}/{total}: {}", patch.position, patch.name));
    }

    fn on_patch_conflict(&self, patch: &PatchArtifact, _detail: &str) {
        self.record(format!("conflict: {}", patch.name));
    }

    fn on_patch_done(&self, patch: &PatchArtifact, status: PatchStatus) {
        self.record(format!("{status}: {}", patch.name));
    }

    fn on_commit_start(&self, commit: &CommitRef, index: usize, total: usize) {
        self.record(format!("commit {index}/{total}: {}", commit.id));
    }

    fn on_message(&self, message: &str) {
        self.record(format!("message: {message}"));
    }

    fn on_warning(&self, message: &str) {
        self.record(format!("warning: {message}"));
    }
}
