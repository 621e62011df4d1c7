//! Configuration for the `kv` CLI
//!
//! Lookup order: `--config`, then `./kvstore.yml`, then
//! `<config_dir>/renderbridge/kvstore.yml`, then built-in defaults.

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const CONFIG_FILE: &str = "kvstore.yml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the JSON store document
    #[serde(rename = "store-path", default = "crate::default_store_path")]
    pub store_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: crate::default_store_path(),
        }
    }
}

impl Config {
    /// Load the explicit file if given, else the first file found on the search path
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::read(path).context(format!("Failed to load config from {}", path.display())),
            None => Ok(Self::first_found(&search_paths())),
        }
    }

    /// First readable candidate wins; unreadable ones are skipped with a warning
    fn first_found(candidates: &[PathBuf]) -> Self {
        for candidate in candidates.iter().filter(|p| p.exists()) {
            match Self::read(candidate) {
                Ok(config) => return config,
                Err(e) => warn!(path = %candidate.display(), error = %e, "Skipping unreadable config"),
            }
        }
        info!("No kvstore config found, using defaults");
        Self::default()
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).context("Failed to read config file")?;
        let config = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        info!(path = %path.display(), "Loaded kvstore config");
        Ok(config)
    }
}

fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("renderbridge").join(CONFIG_FILE));
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_path() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join(CONFIG_FILE);
        std::fs::write(&config_path, "store-path: /srv/kv/data.json\n").unwrap();

        let loaded = Config::load(Some(&config_path)).unwrap();
        assert_eq!(loaded.store_path, PathBuf::from("/srv/kv/data.json"));
    }

    #[test]
    fn test_explicit_path_missing_is_error() {
        let temp = TempDir::new().unwrap();
        assert!(Config::load(Some(&temp.path().join("absent.yml"))).is_err());
    }

    #[test]
    fn test_missing_field_uses_default() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert!(config.store_path.ends_with("kv.json"));
    }

    #[test]
    fn test_search_skips_broken_and_missing_files() {
        let temp = TempDir::new().unwrap();
        let broken = temp.path().join("broken.yml");
        let good = temp.path().join("good.yml");
        std::fs::write(&broken, "store-path: [unclosed").unwrap();
        std::fs::write(&good, "store-path: good.json\n").unwrap();

        let candidates = vec![temp.path().join("absent.yml"), broken, good];
        assert_eq!(Config::first_found(&candidates).store_path, PathBuf::from("good.json"));
        assert!(Config::first_found(&[]).store_path.ends_with("kv.json"));
    }

    #[test]
    fn test_search_path_names() {
        let paths = search_paths();
        assert_eq!(paths[0], PathBuf::from("kvstore.yml"));
        assert!(paths.iter().skip(1).all(|p| p.ends_with("renderbridge/kvstore.yml")));
    }
}
