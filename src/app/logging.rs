//! Logging configuration and initialization
//!
//! Diagnostics always go to stderr, filtered by verbosity. When a log file is
//! configured, every INFO-and-above event is also appended to it with a
//! timestamp, independent of the stderr filter.

use crate::app::config::AppConfig;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::{debug, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const LOG_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Initialize tracing/logging for the application
pub fn init_logging(config: &AppConfig) -> crate::Result<()> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(config.verbose >= 2) // Show target module for -vv and above
        .with_thread_ids(config.verbose >= 3) // Show thread IDs for -vvv
        .with_line_number(config.verbose >= 3) // Show line numbers for -vvv
        .with_filter(EnvFilter::new(config.log_level()));

    let file_layer = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| crate::Error::io(path, e))?;

            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(false)
                    .with_timer(ChronoLocal::new(LOG_TIME_FORMAT.to_string()))
                    .with_filter(LevelFilter::INFO),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();

    debug!("sortwords started with verbosity level: {}", config.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());
    Ok(())
}

/// Initialize stderr-only tracing with just a verbosity level
pub fn init_tracing(verbose: u8) {
    if let Err(e) = init_logging(&AppConfig::new(verbose)) {
        eprintln!("Failed to initialize logging: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_unopenable_log_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing/dir/info.log");

        let result = init_logging(&AppConfig::new(0).with_log_file(Some(path.clone())));

        match result {
            Err(crate::Error::Io { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("expected an I/O error, got {other:?}"),
        }
    }
}
