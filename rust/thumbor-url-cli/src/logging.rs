use tracing::Level;

/// Map the `--verbose` count to a log level.
pub fn level(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install a stderr subscriber so stdout only carries the composed URL.
pub fn init_tracing(verbosity: u8) {
    tracing_subscriber::fmt()
        .with_max_level(level(verbosity))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
