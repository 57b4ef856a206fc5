use super::{get_global_config_dir, Config, CONFIG_FILE_NAME};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Resolves and loads the configuration file for a run
///
/// Lookup order: an explicit path, then `sortwords.toml` in the working
/// directory, then `config.toml` in the global config directory. The first
/// file found is used; environment overrides are applied on top.
pub struct ConfigLoader {
    working_dir: PathBuf,
    global_dir: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            global_dir: get_global_config_dir(),
        }
    }

    pub fn with_global_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.global_dir = dir;
        self
    }

    /// Find the configuration file to use, if any
    pub fn resolve_path(&self, explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(Error::Config(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
            return Ok(Some(path.to_path_buf()));
        }

        let local = self.working_dir.join(CONFIG_FILE_NAME);
        if local.is_file() {
            return Ok(Some(local));
        }

        Ok(self
            .global_dir
            .as_ref()
            .map(|dir| dir.join("config.toml"))
            .filter(|path| path.is_file()))
    }

    /// Load the file (if any) without environment overrides
    pub async fn load_file(&self, explicit: Option<&Path>) -> Result<Config> {
        match self.resolve_path(explicit)? {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                let content = fs::read_to_string(&path)
                    .await
                    .map_err(|e| Error::io(&path, e))?;
                Config::from_toml(&content)
            }
            None => {
                debug!("No configuration file found, using defaults");
                Ok(Config::new())
            }
        }
    }

    /// Load the file, apply environment overrides and validate
    pub async fn load(&self, explicit: Option<&Path>) -> Result<Config> {
        let mut config = self.load_file(explicit).await?;
        config.merge_env_vars();
        config.validate()?;
        Ok(config)
    }
}
