//! Runtime configuration, loaded once from `.routelint.toml` in the
//! working directory. Every field has a default so the file is optional.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub const CONFIG_FILE: &str = ".routelint.toml";

/// Snapshots root used when no configuration overrides it.
pub const DEFAULT_SNAPSHOTS_ROOT: &str = "configs/snapshots";

/// Engine endpoint used when no configuration overrides it.
pub const DEFAULT_ENGINE_URL: &str = "http://localhost:9996";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutelintConfig {
    /// Directory holding one subdirectory per snapshot
    #[serde(default = "default_snapshots_root")]
    pub snapshots_root: PathBuf,

    /// Base URL of the analysis engine
    #[serde(default = "default_engine_url")]
    pub engine_url: String,

    /// Network name the engine groups snapshots under
    #[serde(default = "default_network")]
    pub network: String,
}

fn default_snapshots_root() -> PathBuf {
    PathBuf::from(DEFAULT_SNAPSHOTS_ROOT)
}

fn default_engine_url() -> String {
    DEFAULT_ENGINE_URL.to_string()
}

fn default_network() -> String {
    "my_network".to_string()
}

impl Default for RoutelintConfig {
    fn default() -> Self {
        Self {
            snapshots_root: default_snapshots_root(),
            engine_url: default_engine_url(),
            network: default_network(),
        }
    }
}

impl RoutelintConfig {
    /// Load from `path`, falling back to defaults when the file is absent.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

/// Process-wide configuration. A broken config file logs a warning and
/// falls back to defaults rather than aborting.
pub fn get_config() -> &'static RoutelintConfig {
    static CONFIG: OnceLock<RoutelintConfig> = OnceLock::new();
    CONFIG.get_or_init(|| {
        RoutelintConfig::load(Path::new(CONFIG_FILE)).unwrap_or_else(|e| {
            log::warn!("failed to load {CONFIG_FILE}: {e}; using defaults");
            RoutelintConfig::default()
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = RoutelintConfig::default();
        assert_eq!(config.snapshots_root, PathBuf::from("configs/snapshots"));
        assert_eq!(config.engine_url, "http://localhost:9996");
        assert_eq!(config.network, "my_network");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config: RoutelintConfig =
            toml::from_str("snapshots_root = \"/srv/snapshots\"").unwrap();
        assert_eq!(config.snapshots_root, PathBuf::from("/srv/snapshots"));
        assert_eq!(config.engine_url, DEFAULT_ENGINE_URL);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = RoutelintConfig::load(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.network, "my_network");
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = RoutelintConfig::default();
        let serialized = toml::to_string(&config).unwrap();
        let parsed: RoutelintConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.engine_url, config.engine_url);
    }
}
