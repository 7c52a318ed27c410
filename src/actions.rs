//! Communication with the CI pipeline that runs commit-bump.
//!
//! Inputs, outputs and failures follow the GitHub Actions conventions:
//! inputs arrive as `INPUT_<NAME>` environment variables, outputs are appended
//! to the file named by `$GITHUB_OUTPUT`, and failures are reported with the
//! `::error::` workflow command.

use crate::error::Result;
use crate::ui;
use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

const OUTPUT_FILE_VAR: &str = "GITHUB_OUTPUT";

/// Reads a pipeline input.
///
/// `version-file` is looked up as `INPUT_VERSION-FILE`. Surrounding whitespace
/// is trimmed and an empty value counts as unset.
pub fn input(name: &str) -> Option<String> {
    let key = format!("INPUT_{}", name.replace(' ', "_").to_uppercase());
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Where status messages, outputs and failures are reported.
pub trait PipelineHost {
    /// Report an informational message.
    fn info(&mut self, message: &str);

    /// Publish a named output value for later pipeline steps.
    fn set_output(&mut self, name: &str, value: &str) -> Result<()>;

    /// Mark the step as failed with the given message.
    fn set_failed(&mut self, message: &str);
}

/// GitHub Actions runner host.
#[derive(Debug, Clone, Default)]
pub struct GithubActions {
    output_file: Option<PathBuf>,
}

impl GithubActions {
    /// Host that appends outputs to `output_file`, or falls back to the
    /// `::set-output` command on stdout when no file is given.
    pub fn new(output_file: Option<PathBuf>) -> Self {
        GithubActions { output_file }
    }

    /// Host configured from `$GITHUB_OUTPUT`.
    pub fn from_env() -> Self {
        let output_file = env::var_os(OUTPUT_FILE_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        Self::new(output_file)
    }
}

impl PipelineHost for GithubActions {
    fn info(&mut self, message: &str) {
        ui::display_status(message);
    }

    fn set_output(&mut self, name: &str, value: &str) -> Result<()> {
        match &self.output_file {
            Some(path) => {
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                writeln!(file, "{}={}", name, value)?;
                Ok(())
            }
            None => {
                println!(
                    "::set-output name={}::{}",
                    escape_property(name),
                    escape_data(value)
                );
                Ok(())
            }
        }
    }

    fn set_failed(&mut self, message: &str) {
        println!("::error::{}", escape_data(message));
    }
}

/// Host that records everything in memory, for tests and dry runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryHost {
    pub messages: Vec<String>,
    pub outputs: Vec<(String, String)>,
    pub failure: Option<String>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last value published under `name`.
    pub fn output(&self, name: &str) -> Option<&str> {
        self.outputs
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

impl PipelineHost for MemoryHost {
    fn info(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }

    fn set_output(&mut self, name: &str, value: &str) -> Result<()> {
        self.outputs.push((name.to_string(), value.to_string()));
        Ok(())
    }

    fn set_failed(&mut self, message: &str) {
        self.failure = Some(message.to_string());
    }
}

fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}
