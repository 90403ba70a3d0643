//! patchbay - land a batch of patch files on a protected branch
//!
//! A run has two stages:
//! 1. Apply - `git am` every patch onto a temporary branch forked from the
//!    target branch, asking the operator to continue, skip or abort when a
//!    patch does not apply
//! 2. Replay - cherry-pick the resulting commits onto the target branch one
//!    at a time, with a review menu after each one
//!
//! Whatever happens, the run ends back on the original branch with the
//! temporary branch deleted.
//!
//! git is reached only through [`vcs::VcsGateway`], and the operator only
//! through [`operator::Operator`], so both can be replaced in tests.

pub mod apply;
pub mod config;
pub mod error;
pub mod operator;
pub mod patches;
pub mod progress;
pub mod replay;
pub mod restore;
pub mod review;
pub mod types;
pub mod vcs;
pub mod workflow;
