use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Source folder is not a readable directory: {}", .path.display())]
    InvalidSource { path: PathBuf },

    #[error("Traversal error under {}: {source}", .path.display())]
    Traversal {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Error copying file {} to {}: {source}", .source_path.display(), .destination.display())]
    Copy {
        source_path: PathBuf,
        destination: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to download text from {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to download text from {url}: HTTP status {status}")]
    FetchStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Terminal error: {0}")]
    Terminal(#[source] std::io::Error),

    #[error("Tokenize error: {0}")]
    Tokenize(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl Error {
    /// Attach a path to an I/O error
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit code for this error when it ends the run
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) | Error::Toml(_) => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
