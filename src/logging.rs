//! Diagnostics go to stderr through `tracing`; stdout is command output.

use tracing_subscriber::EnvFilter;

/// Filter directive for the configured level, raised to `debug` by `-v`.
pub fn filter_directive(configured: &str, verbose: bool) -> String {
    if verbose && configured != "trace" {
        "debug".to_string()
    } else {
        configured.to_string()
    }
}

/// Install the global subscriber. `RUST_LOG` wins when set.
pub fn init(configured: &str, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(configured, verbose)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .with_target(false)
        .try_init();
}
