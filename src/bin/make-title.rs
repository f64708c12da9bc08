use std::{
    fs::File,
    io::{self, BufReader},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Parser;
use homebin::title::{first_line, make_title, DEFAULT_GARMENT, DEFAULT_LINE_WIDTH, DEFAULT_MARGIN};
use log::error;

/// Sometimes you want a comment in a file to look more like a title than the
/// other comments. This makes a banner out of the first line of the input.
#[derive(Parser, Debug)]
#[command(name = "make-title", version)]
struct Args {
    /// Garment to dress the string in
    #[arg(short, long, default_value = DEFAULT_GARMENT)]
    garment: String,

    /// Line width
    #[arg(short = 'w', long = "line-width", default_value_t = DEFAULT_LINE_WIDTH)]
    line_width: usize,

    /// File to read (default: stdin)
    input: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    homebin::logging::init(0);

    match run(&args) {
        Ok(title) => {
            println!("{}", title);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<String> {
    let line = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            first_line(BufReader::new(file))?
        }
        None => first_line(io::stdin().lock())?,
    };

    Ok(make_title(&line, &args.garment, args.line_width, DEFAULT_MARGIN))
}
