//! Render bridge configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::exports::{DEFAULT_TITLE, DEFAULT_VISIT_KEY, ExportSettings};
use crate::render::DEFAULT_MAX_DEPTH;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Template rendering
    pub render: RenderConfig,

    /// Key-value store used by `renderKV`
    pub kv: KvConfig,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: renderbridge.yml
        let local_config = PathBuf::from("renderbridge.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/renderbridge/renderbridge.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("renderbridge").join("renderbridge.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Settings handed to the standard exports
    pub fn export_settings(&self) -> ExportSettings {
        ExportSettings {
            default_title: self.render.default_title.clone(),
            visit_key: self.kv.visit_key.clone(),
            max_depth: self.render.max_depth,
        }
    }
}

/// Template rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Title used by `renderIndex` when the host passes none
    #[serde(rename = "default-title")]
    pub default_title: String,

    /// Directory holding `<component>.hbs` overrides
    #[serde(rename = "templates-dir")]
    pub templates_dir: Option<PathBuf>,

    /// Maximum component nesting
    #[serde(rename = "max-depth")]
    pub max_depth: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            default_title: DEFAULT_TITLE.to_string(),
            templates_dir: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Which store implementation backs the bridge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KvBackend {
    #[default]
    File,
    Memory,
}

/// Key-value store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KvConfig {
    pub backend: KvBackend,

    /// Store document for the file backend
    #[serde(rename = "store-path")]
    pub store_path: PathBuf,

    /// Key read and written by `renderKV`
    #[serde(rename = "visit-key")]
    pub visit_key: String,
}

impl Default for KvConfig {
    fn default() -> Self {
        Self {
            backend: KvBackend::File,
            store_path: kvstore::default_store_path(),
            visit_key: DEFAULT_VISIT_KEY.to_string(),
        }
    }
}
