use serde::{Deserialize, Serialize};
use std::path::Path;
use anyhow::{Context, Result};

use crate::engine::config::{EngineConfig, DEFAULT_MAX_INPUT_SIZE};

pub const DEFAULT_CONFIG_FILE: &str = "huffpack.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// `tracing` filter used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Appended to the input path when `encode` has no explicit output
    pub output_extension: String,
    pub max_input_size: usize,
    pub verify_checksum: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: "huffpack=info".to_string(),
            output_extension: ".huf".to_string(),
            max_input_size: DEFAULT_MAX_INPUT_SIZE,
            verify_checksum: true,
        }
    }
}

impl AppConfig {
    /// An explicit path must exist. Without one, `huffpack.toml` in the
    /// working directory is used when present, else defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        match config_path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(config_path: impl AsRef<Path>) -> Result<Self> {
        let path = config_path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self, config_path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path.as_ref(), content)?;
        Ok(())
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            max_input_size: self.max_input_size,
            verify_checksum: self.verify_checksum,
        }
    }
}
