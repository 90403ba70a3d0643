//! Shared test utilities

#![allow(unused_imports)]

mod fixtures;
mod mock_gateway;
mod temp_repo;

pub use fixtures::{commit, patch, run_config, run_context, sha};
pub use mock_gateway::{MockGateway, RecordingProgress, ScriptedOperator};
pub use temp_repo::TempGitRepo;
