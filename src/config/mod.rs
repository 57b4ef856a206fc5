use crate::error::{Error, Result};
use crate::sort::ConflictPolicy;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

pub mod loader;

pub use loader::ConfigLoader;

/// Text fetched by `sortwords words` when no URL or input file is given
pub const DEFAULT_TEXT_URL: &str = "https://www.gutenberg.org/cache/epub/1160/pg1160.txt";

/// Name of the project-local configuration file
pub const CONFIG_FILE_NAME: &str = "sortwords.toml";

/// Get the global sortwords directory holding `config.toml`
pub fn get_global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "sortwords", "sortwords").map(|dirs| dirs.config_dir().to_path_buf())
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub sort: SortConfig,
    pub words: WordsConfig,
    /// Problems found while merging overrides, logged once logging is up
    #[serde(skip)]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SortConfig {
    /// Upper bound on copies in flight at once
    pub max_parallel: usize,
    pub on_conflict: ConflictPolicy,
    pub log_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WordsConfig {
    pub url: String,
    pub top_n: usize,
    /// Worker pool size for the map and reduce stages; defaults to available parallelism
    pub workers: Option<usize>,
    pub chart_width: usize,
    pub timeout_secs: Option<u64>,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            max_parallel: 64,
            on_conflict: ConflictPolicy::Overwrite,
            log_file: PathBuf::from("info.log"),
        }
    }
}

impl Default for WordsConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_TEXT_URL.to_string(),
            top_n: 10,
            workers: None,
            chart_width: 50,
            timeout_secs: None,
        }
    }
}

impl WordsConfig {
    /// Worker count to use for the map and reduce pools
    pub fn effective_workers(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
        })
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn merge_env_vars(&mut self) {
        self.merge_env_with(|key| std::env::var(key).ok());
    }

    /// Apply `SORTWORDS_*` overrides read through `lookup`
    pub fn merge_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = parse_env(&lookup, "SORTWORDS_MAX_PARALLEL", &mut self.warnings) {
            self.sort.max_parallel = value;
        }

        if let Some(value) = parse_env(&lookup, "SORTWORDS_ON_CONFLICT", &mut self.warnings) {
            self.sort.on_conflict = value;
        }

        if let Some(log_file) = lookup("SORTWORDS_LOG_FILE") {
            self.sort.log_file = PathBuf::from(log_file);
        }

        if let Some(url) = lookup("SORTWORDS_URL") {
            self.words.url = url;
        }

        if let Some(value) = parse_env(&lookup, "SORTWORDS_TOP_N", &mut self.warnings) {
            self.words.top_n = value;
        }

        if let Some(value) = parse_env(&lookup, "SORTWORDS_WORKERS", &mut self.warnings) {
            self.words.workers = Some(value);
        }
    }

    /// Log the warnings collected while loading
    pub fn emit_warnings(&self) {
        for warning in &self.warnings {
            warn!("{}", warning);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.sort.max_parallel == 0 {
            return Err(Error::Config(
                "sort.max_parallel must be at least 1".to_string(),
            ));
        }

        if self.words.workers == Some(0) {
            return Err(Error::Config("words.workers must be at least 1".to_string()));
        }

        if self.words.chart_width == 0 {
            return Err(Error::Config(
                "words.chart_width must be at least 1".to_string(),
            ));
        }

        if self.words.url.trim().is_empty() {
            return Err(Error::Config("words.url must not be empty".to_string()));
        }

        Ok(())
    }
}

fn parse_env<T, F>(lookup: &F, key: &str, warnings: &mut Vec<String>) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warnings.push(format!("Ignoring {key}: cannot parse {raw:?}"));
            None
        }
    }
}
