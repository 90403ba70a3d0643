//! Patch application onto the temporary branch
//!
//! Patches go through `git am` one at a time. When one does not apply, the
//! operator is asked how to proceed (see [`resolve_conflict`]); nothing here
//! ever touches the target branch.

mod conflict;
mod execute;

pub use conflict::{ConflictChoice, ConflictResolution, resolve_conflict};
pub use execute::{ApplyOutcome, ApplySummary, apply_patches, start_temp_branch};
