//! Application configuration
//!
//! Runtime settings that shape logging and error reporting for a single run.

use std::path::PathBuf;

/// Application configuration structure
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Verbosity level for stderr logging
    pub verbose: u8,
    /// File that receives an INFO-level copy of every log entry
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    /// Create a new application configuration
    pub fn new(verbose: u8) -> Self {
        Self {
            verbose,
            log_file: None,
        }
    }

    /// Also write log entries to the given file
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    /// Get the stderr filter directive based on verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace,hyper=debug,reqwest=debug",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_by_verbosity() {
        assert_eq!(AppConfig::new(0).log_level(), "warn");
        assert_eq!(AppConfig::new(1).log_level(), "info");
        assert_eq!(AppConfig::new(2).log_level(), "debug");
        assert!(AppConfig::new(5).log_level().starts_with("trace"));
    }

    #[test]
    fn test_with_log_file() {
        let config = AppConfig::new(0).with_log_file(Some(PathBuf::from("info.log")));
        assert_eq!(config.log_file, Some(PathBuf::from("info.log")));
    }
}
