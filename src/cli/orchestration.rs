//! Main workflow orchestration logic
//!
//! The bump workflow is kept apart from argument parsing so it can be driven
//! programmatically with any [CommitSource] and [PipelineHost].

use std::path::PathBuf;

use tracing::{debug, info};

use crate::actions::PipelineHost;
use crate::conventional;
use crate::error::Result;
use crate::git::CommitSource;
use crate::manifest::{Manifest, DEFAULT_MANIFEST};
use crate::version::{BumpLevel, Version};

/// Name of the output that carries the bumped version.
pub const NEW_VERSION_OUTPUT: &str = "new-version";

/// Arguments for the bump workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
#[derive(Debug, Clone, PartialEq)]
pub struct BumpWorkflowArgs {
    /// Path to the manifest, relative to the working directory
    pub version_file: PathBuf,

    /// Compute the new version without writing it or publishing outputs
    pub dry_run: bool,
}

impl Default for BumpWorkflowArgs {
    fn default() -> Self {
        BumpWorkflowArgs {
            version_file: PathBuf::from(DEFAULT_MANIFEST),
            dry_run: false,
        }
    }
}

impl BumpWorkflowArgs {
    /// Arguments for the given manifest path, or the default manifest when `None`.
    pub fn for_version_file(version_file: Option<PathBuf>) -> Self {
        BumpWorkflowArgs {
            version_file: version_file.unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST)),
            ..Self::default()
        }
    }
}

/// Result of a successful bump workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The version was bumped (and written, unless this was a dry run)
    Bumped {
        previous: Version,
        next: Version,
        level: BumpLevel,
    },

    /// The latest commit carried no bump marker
    Unchanged,
}

/// Main bump workflow
///
/// 1. Load the manifest and its current version
/// 2. Read the latest commit text and classify it
/// 3. Stop without side effects if there is nothing to bump
/// 4. Write the bumped version back and publish it as `new-version`
///
/// The manifest write is the only side effect on disk and happens after every
/// check has passed.
pub fn run_bump_workflow<R, H>(args: &BumpWorkflowArgs, repo: &R, host: &mut H) -> Result<Outcome>
where
    R: CommitSource + ?Sized,
    H: PipelineHost + ?Sized,
{
    let mut manifest = Manifest::load(&args.version_file)?;
    let current = manifest.version()?;
    debug!(path = %manifest.path().display(), version = %current, "loaded manifest");

    let commit_text = repo.latest_commit_text()?;
    let level = conventional::classify(&commit_text);
    debug!(%level, "classified latest commit");

    if !level.is_bump() {
        host.info("No version bump detected based on commit messages.");
        return Ok(Outcome::Unchanged);
    }

    let next = current.bump(level)?;
    info!(%current, %next, %level, "computed new version");

    if args.dry_run {
        host.info(&format!(
            "Dry run: {} would be updated to {}",
            manifest.path().display(),
            next
        ));
    } else {
        manifest.set_version(next);
        manifest.save()?;
        host.info(&format!("Version updated to {}", next));
        host.set_output(NEW_VERSION_OUTPUT, &next.to_string())?;
    }

    Ok(Outcome::Bumped {
        previous: current,
        next,
        level,
    })
}
