//! Logging initialization

/// Initialize logging to stderr
///
/// `RUST_LOG` takes precedence; otherwise `info`, or `debug` when the debug
/// flag is set.
pub fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_ansi(true)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();
}
