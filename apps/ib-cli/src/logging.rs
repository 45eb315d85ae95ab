//! Console logging setup.

use ib_app::{AppError, AppResult};
use tracing::level_filters::LevelFilter;

/// Map a `--loglevel` value to a filter. Names are case-insensitive.
///
/// `CRITICAL` has no tracing counterpart and shares `ERROR`; `NOTSET`
/// switches logging off.
pub fn parse_level(name: &str) -> AppResult<LevelFilter> {
    match name.to_ascii_uppercase().as_str() {
        "CRITICAL" | "FATAL" | "ERROR" => Ok(LevelFilter::ERROR),
        "WARNING" | "WARN" => Ok(LevelFilter::WARN),
        "INFO" => Ok(LevelFilter::INFO),
        "DEBUG" => Ok(LevelFilter::DEBUG),
        "NOTSET" => Ok(LevelFilter::OFF),
        _ => Err(AppError::InvalidLogLevel(name.to_string())),
    }
}

/// Install the stderr subscriber.
pub fn init(level: LevelFilter) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
