//! Command-line workflow entry points

pub mod orchestration;

pub use orchestration::{run_bump_workflow, BumpWorkflowArgs, Outcome, NEW_VERSION_OUTPUT};
