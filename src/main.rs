use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use commit_bump::actions::{self, GithubActions, PipelineHost};
use commit_bump::cli::{run_bump_workflow, BumpWorkflowArgs, Outcome};
use commit_bump::git::Git2Repository;
use commit_bump::ui;

#[derive(clap::Parser)]
#[command(
    name = "commit-bump",
    version,
    about = "Bump the manifest version from the latest conventional commit"
)]
struct Args {
    #[arg(
        long,
        value_name = "PATH",
        help = "Manifest holding the version [default: $INPUT_VERSION-FILE or package.json]"
    )]
    version_file: Option<PathBuf>,

    #[arg(
        short,
        long,
        value_name = "PATH",
        default_value = ".",
        help = "Path inside the git repository to inspect"
    )]
    repo: PathBuf,

    #[arg(long, help = "Preview the new version without writing it")]
    dry_run: bool,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut host = GithubActions::from_env();

    match run(&args, &mut host) {
        Ok(Outcome::Bumped { previous, next, .. }) => {
            if args.dry_run {
                ui::display_proposed_version(previous, next);
            } else {
                ui::display_success(&format!("Bumped {} to {}", previous, next));
            }
            ExitCode::SUCCESS
        }
        Ok(Outcome::Unchanged) => ExitCode::SUCCESS,
        Err(e) => {
            let message = format!("{:#}", e);
            ui::display_error(&message);
            host.set_failed(&message);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, host: &mut GithubActions) -> Result<Outcome> {
    let version_file = args
        .version_file
        .clone()
        .or_else(|| actions::input("version-file").map(PathBuf::from));

    let workflow_args = BumpWorkflowArgs {
        dry_run: args.dry_run,
        ..BumpWorkflowArgs::for_version_file(version_file)
    };

    let repo = Git2Repository::open(&args.repo)?;
    let outcome = run_bump_workflow(&workflow_args, &repo, host)?;
    Ok(outcome)
}

// Diagnostics go to stderr; stdout carries status lines and workflow commands.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "commit_bump=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}
