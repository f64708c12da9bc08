use log::LevelFilter;

/// Maps a `-v` count to a level filter: warnings by default, then info,
/// debug and trace.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Initializes `env_logger` at the level chosen on the command line.
/// `RUST_LOG` is applied on top, so it can still narrow things per module.
pub fn init(verbosity: u8) {
    env_logger::Builder::new()
        .filter_level(level_for(verbosity))
        .format_timestamp(None)
        .parse_default_env()
        .init();
}
