use std::{path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::{ArgAction, Parser};
use homebin::monman::{self, layout, Direction, Monman, SystemXrandr};
use log::{error, info};

/// Find and activate monitors via xrandr!
#[derive(Parser, Debug)]
#[command(name = "monman", version)]
struct Args {
    /// Path to configuration file (default: ~/.config/monitors.json)
    config: Option<PathBuf>,

    /// Activate monitors from config
    #[arg(short, long, conflicts_with_all = ["check", "deactivate"])]
    activate: bool,

    /// Check if monitor M is connected
    #[arg(short, long, value_name = "M", conflicts_with = "deactivate")]
    check: Option<String>,

    /// Deactivate all monitors except for primary
    #[arg(short, long)]
    deactivate: bool,

    /// Try action without making any real changes
    #[arg(long, alias = "dry-run")]
    dryrun: bool,

    /// Sort the list of monitors
    #[arg(short, long = "sort")]
    sorting: bool,

    /// Where each monitor goes relative to the previous one
    #[arg(long, value_enum, default_value = "right-of")]
    direction: Direction,

    /// Print more stuff
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    homebin::logging::init(args.verbose.min(3));

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let monman = Monman::new(SystemXrandr, args.sorting, args.dryrun);

    if args.activate {
        let config = match &args.config {
            Some(config) => config.clone(),
            None => monman::default_config_path()?,
        };
        info!("Activating monitors from file {}", config.display());
        monman.activate(&layout::load(&config)?, args.direction)
    } else if let Some(monitor) = &args.check {
        info!("Checking for monitor {}", monitor);
        println!("{}", monman.check(monitor)?);
        Ok(())
    } else if args.deactivate {
        info!("Deactivating all external monitors.");
        monman.deactivate()
    } else {
        info!("Looking for connected monitors...");
        for monitor in monman.connected()? {
            println!("{}", monitor);
        }
        Ok(())
    }
}
