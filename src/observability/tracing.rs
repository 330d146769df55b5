use tracing_subscriber::EnvFilter;

/// Environment variable consulted when `RUST_LOG` is unset.
pub const LOG_ENV: &str = "LOBBYMAP_LOG";

/// Default filter for a `-v` count.
pub fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize the global subscriber. Logs go to stderr so report output on
/// stdout stays machine-readable.
pub fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_env("RUST_LOG")
        .or_else(|_| EnvFilter::try_from_env(LOG_ENV))
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbosity)));

    // Fails only when a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
