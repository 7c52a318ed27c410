//! JSON project manifest holding the version field.
//!
//! The document is kept as an insertion-ordered map, so every field other than
//! `version` is written back in its original position with its original value.

use crate::error::{BumpError, Result};
use crate::version::Version;
use serde_json::{Map, Value};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Conventional manifest filename looked up in the working directory.
pub const DEFAULT_MANIFEST: &str = "package.json";

const VERSION_FIELD: &str = "version";

/// A loaded manifest document together with the path it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    path: PathBuf,
    document: Map<String, Value>,
}

impl Manifest {
    /// Reads and validates the manifest at `path`.
    ///
    /// # Returns
    /// * `Ok(Manifest)` - The file is a JSON object with a valid `version`
    /// * `Err(BumpError::Manifest)` - Missing, unreadable, not JSON, not an
    ///   object, or the version field is absent or malformed
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            BumpError::manifest(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_json(path, &contents)
    }

    /// Parses manifest text that was read from `path`.
    pub fn from_json<P: Into<PathBuf>>(path: P, contents: &str) -> Result<Self> {
        let path = path.into();
        let value: Value = serde_json::from_str(contents).map_err(|e| {
            BumpError::manifest(format!("'{}' is not valid JSON: {}", path.display(), e))
        })?;

        let document = match value {
            Value::Object(map) => map,
            other => {
                return Err(BumpError::manifest(format!(
                    "'{}' must contain a JSON object, found {}",
                    path.display(),
                    json_kind(&other)
                )))
            }
        };

        let manifest = Manifest { path, document };
        manifest.version()?;
        Ok(manifest)
    }

    /// Path the manifest was loaded from and will be written back to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw `version` string as stored in the document.
    pub fn raw_version(&self) -> Result<&str> {
        match self.document.get(VERSION_FIELD) {
            Some(Value::String(s)) => Ok(s.as_str()),
            Some(other) => Err(BumpError::manifest(format!(
                "'{}' field in '{}' must be a string, found {}",
                VERSION_FIELD,
                self.path.display(),
                json_kind(other)
            ))),
            None => Err(BumpError::manifest(format!(
                "'{}' has no '{}' field",
                self.path.display(),
                VERSION_FIELD
            ))),
        }
    }

    /// Current version, parsed from the `version` field.
    pub fn version(&self) -> Result<Version> {
        let raw = self.raw_version()?;
        Version::parse(raw).map_err(|e| {
            BumpError::manifest(format!(
                "Malformed version in '{}': {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Replaces the version field, keeping its position in the document.
    pub fn set_version(&mut self, version: Version) {
        self.document
            .insert(VERSION_FIELD.to_string(), Value::String(version.to_string()));
    }

    /// Renders the document with 2-space indentation and a trailing newline.
    pub fn to_pretty_string(&self) -> Result<String> {
        let mut rendered = serde_json::to_string_pretty(&self.document)
            .map_err(|e| BumpError::manifest(format!("Cannot serialize manifest: {}", e)))?;
        rendered.push('\n');
        Ok(rendered)
    }

    /// Writes the document back to its path.
    ///
    /// The new contents go to a temporary file in the same directory which then
    /// replaces the manifest, so a failed write leaves the old file intact.
    pub fn save(&self) -> Result<()> {
        let rendered = self.to_pretty_string()?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(rendered.as_bytes())?;
        tmp.as_file().sync_all()?;

        if let Ok(metadata) = fs::metadata(&self.path) {
            tmp.as_file().set_permissions(metadata.permissions())?;
        }

        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
