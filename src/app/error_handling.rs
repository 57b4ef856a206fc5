//! Error handling utilities
//!
//! Centralized reporting for errors that end the run.

use tracing::debug;

/// Report a fatal error and exit with its status code
///
/// - `verbose = 0`: the top-level message only
/// - `verbose >= 1`: the full error chain as well
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    debug!("Fatal error: {}", error);
    eprintln!("Error: {error}");

    if verbose >= 1 {
        eprintln!("\nError chain:");
        for (i, cause) in error.chain().enumerate() {
            eprintln!("  {}: {}", i, cause);
        }
    }

    let exit_code = error
        .downcast_ref::<crate::Error>()
        .map(crate::Error::exit_code)
        .unwrap_or(1);

    std::process::exit(exit_code)
}
