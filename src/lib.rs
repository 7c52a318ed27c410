pub mod actions;
pub mod cli;
pub mod conventional;
pub mod error;
pub mod git;
pub mod manifest;
pub mod ui;
pub mod version;

pub use error::{BumpError, Result};
