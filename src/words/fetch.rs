//! Loading the text to analyze
//!
//! Text comes from a single HTTP GET (no retries) or from a local file.

use crate::error::{Error, Result};
use reqwest::Client;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// HTTP client for downloading plain-text documents
pub struct TextFetcher {
    client: Client,
}

impl TextFetcher {
    /// Create a fetcher; `timeout` bounds the whole request when set
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder =
            Client::builder().user_agent(concat!("sortwords/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Use a preconfigured client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Download `url` and return the body as text
    pub async fn fetch(&self, url: &str) -> Result<String> {
        info!("Downloading text from {}", url);

        let response = self.client.get(url).send().await.map_err(|source| Error::Fetch {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::FetchStatus {
                url: url.to_string(),
                status,
            });
        }

        let text = response.text().await.map_err(|source| Error::Fetch {
            url: url.to_string(),
            source,
        })?;

        debug!("Downloaded {} bytes from {}", text.len(), url);
        Ok(text)
    }
}

/// Where the text for a word count comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource {
    Url(String),
    File(PathBuf),
}

impl TextSource {
    pub async fn load(&self, timeout: Option<Duration>) -> Result<String> {
        match self {
            TextSource::Url(url) => TextFetcher::new(timeout)?.fetch(url).await,
            TextSource::File(path) => {
                info!("Reading text from {}", path.display());
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| Error::io(path, e))
            }
        }
    }
}

impl fmt::Display for TextSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextSource::Url(url) => f.write_str(url),
            TextSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}
