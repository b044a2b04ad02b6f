//! Tracing subscriber setup for binaries and tools embedding the builder

use tracing_subscriber::EnvFilter;

/// Log line format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Plain,
    /// One JSON object per event
    Json,
}

/// Install a global subscriber writing to stderr
///
/// The filter comes from `RUST_LOG`, defaulting to `info`. Returns `false`
/// if a global subscriber was already installed.
pub fn init_tracing(format: LogFormat) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    match format {
        LogFormat::Plain => builder.try_init().is_ok(),
        LogFormat::Json => builder.json().try_init().is_ok(),
    }
}
