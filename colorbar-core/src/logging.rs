use std::io;
use tracing_subscriber::{EnvFilter, fmt};

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stdout,
    /// Keeps stdout free for dashboard frames or JSON summaries.
    Stderr,
}

/// Initialize the logging system with JSON formatting and environment-based filtering
///
/// - Uses `RUST_LOG` for filtering (defaults to "info" if not set)
/// - Configures JSON output format for structured logging
/// - Flattens event fields for cleaner log output
pub fn init_normal_logging(target: LogTarget) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = fmt().with_env_filter(filter).json().flatten_event(true);

    match target {
        LogTarget::Stdout => builder.init(),
        LogTarget::Stderr => builder.with_writer(io::stderr).init(),
    }
}

pub fn init_logging(target: LogTarget) {
    // tokio-console replaces the normal subscriber entirely
    if std::env::var("TOKIO_CONSOLE").is_ok() {
        init_console_logging();
    } else {
        init_normal_logging(target);
    }
}

fn init_console_logging() {
    console_subscriber::init();
}
