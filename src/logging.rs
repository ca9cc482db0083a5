use std::env;

use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `RUST_LOG` picks the filter (default `info`),
/// `LOG_FORMAT=json` switches to JSON lines.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stdout);

    let result = if env::var("LOG_FORMAT").is_ok_and(|format| format == "json") {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    };

    if let Err(err) = result {
        warn!("failed to initialize logging, it may already be initialized: {err}");
    }
}
