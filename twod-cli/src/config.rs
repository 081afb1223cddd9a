use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use twod_core::{ClientConfig, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    pub data_dir: PathBuf,
    pub verbose: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("twod"),
            verbose: false,
        }
    }
}

impl CliConfig {
    pub fn new(data_dir: Option<PathBuf>, verbose: bool) -> Self {
        let defaults = Self::default();
        Self {
            data_dir: data_dir.unwrap_or(defaults.data_dir),
            verbose,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Optional `config.json` overriding backend URLs, timeouts and the stake floor.
    pub fn client_config_path(&self) -> PathBuf {
        self.data_dir.join("config.json")
    }

    pub async fn client_config(&self) -> Result<ClientConfig> {
        ClientConfig::load_or_default(&self.client_config_path()).await
    }
}
