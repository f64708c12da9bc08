use std::{path::PathBuf, process::ExitCode};

use clap::{ArgAction, Parser};
use homebin::git;
use log::error;

/// Takes a URI to a Git repo and clones it into <git-location>/<host>/<owner>/<repo>.
#[derive(Parser, Debug)]
#[command(name = "git-get", version)]
struct Args {
    /// The git repo URI to clone
    git_repo: String,

    /// Just print, never modify anything
    #[arg(long)]
    dry_run: bool,

    /// Where to keep git repos, overrides GLOBAL_GIT_LOCATION (default: ~/git)
    #[arg(long)]
    git_location: Option<PathBuf>,

    /// Print more, repeat for more detail
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    // Dry runs always report their plan.
    let verbosity = if args.dry_run { args.verbose.max(1) } else { args.verbose };
    homebin::logging::init(verbosity.min(3));

    let location = match args.git_location.clone() {
        Some(location) => Ok(location),
        None => git::default_location(),
    };
    let location = match location {
        Ok(location) => location,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match git::get(&args.git_repo, &location, args.dry_run) {
        Ok(target) => {
            println!("{}", target.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
