use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "storeblocks.config.json";

/// Storeblocks configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding one subdirectory per store
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Store edited when no `--store` is given
    #[serde(default = "default_store_id")]
    pub store_id: String,

    /// Path prefix that storefront links are scoped under
    #[serde(default = "default_route_prefix")]
    pub route_prefix: String,

    /// Undo history depth for editing sessions
    #[serde(default = "default_undo_levels")]
    pub undo_levels: usize,

    /// Indent rendered HTML
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_store_id() -> String {
    "default".to_string()
}

fn default_route_prefix() -> String {
    "/store".to_string()
}

fn default_undo_levels() -> usize {
    100
}

fn default_pretty() -> bool {
    true
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to the data directory
    pub fn get_data_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.data_dir)
    }

    /// Store to operate on, preferring an explicit override
    pub fn store<'a>(&'a self, overridden: Option<&'a str>) -> &'a str {
        overridden.unwrap_or(&self.store_id)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            store_id: default_store_id(),
            route_prefix: default_route_prefix(),
            undo_levels: default_undo_levels(),
            pretty: default_pretty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "dataDir": "stores",
            "storeId": "acme",
            "routePrefix": "/shop",
            "undoLevels": 20,
            "pretty": false
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.data_dir, "stores");
        assert_eq!(config.store_id, "acme");
        assert_eq!(config.route_prefix, "/shop");
        assert_eq!(config.undo_levels, 20);
        assert!(!config.pretty);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{ "storeId": "acme" }"#).unwrap();
        assert_eq!(config.store_id, "acme");
        assert_eq!(config.data_dir, "data");
        assert_eq!(config.route_prefix, "/store");
        assert!(config.pretty);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.data_dir, "data");
        assert_eq!(config.store_id, "default");
        assert_eq!(config.undo_levels, 100);
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_store_override() {
        let config = Config::default();
        assert_eq!(config.store(None), "default");
        assert_eq!(config.store(Some("acme")), "acme");
    }
}
