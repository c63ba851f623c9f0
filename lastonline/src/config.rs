use std::env::var;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use dotenvy::dotenv;
use lastonline_store::Capacity;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::PluginError;

/// File name of the plugin options inside the data folder.
pub const CONFIG_FILE: &str = "config.yml";

/// Shipped `config.yml`, written to the data folder on first start.
pub const DEFAULT_CONFIG: &str = include_str!("../assets/config.yml");

/// Plugin options read from `config.yml`. Missing keys fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Config {
    /// Maximum number of tracked players, -1 for no limit
    pub max_users: i64,

    /// Maximum number of players in the list report
    pub max_users_reporting: usize,

    /// Maximum number of time units in a relative time phrase
    pub max_time_units: usize,

    /// Whether joining also updates the last seen time (otherwise only quitting does)
    pub count_online_players: bool,

    /// Render the list report as a chest menu
    #[serde(rename = "UseGUI")]
    pub use_gui: bool,

    /// Seconds between periodic writes of `users.yml`
    pub save_interval_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_users: 100,
            max_users_reporting: 10,
            max_time_units: 3,
            count_online_players: true,
            use_gui: false,
            save_interval_seconds: 300,
        }
    }
}

impl Config {
    /// Load `config.yml` from `path`, writing the shipped defaults first if it doesn't exist.
    pub fn load_or_create(path: impl AsRef<Path>) -> Result<Self, PluginError> {
        load_yaml_or_create(path.as_ref(), DEFAULT_CONFIG)
    }

    pub fn capacity(&self) -> Capacity {
        Capacity::from_max_users(self.max_users)
    }

    /// Interval between flushes, never shorter than one second.
    pub fn save_interval(&self) -> Duration {
        Duration::from_secs(self.save_interval_seconds.max(1))
    }
}

/// Host process configuration with environment variable overrides
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Plugin data folder holding config.yml, messages.yml and users.yml
    /// Env: LASTONLINE_DATA_DIR (default: "plugins/LastOnline")
    pub data_dir: PathBuf,

    /// Log filter directives, same syntax as RUST_LOG
    /// Env: LASTONLINE_LOG (default: unset, falls back to the build's default level)
    pub log_filter: Option<String>,
}

impl HostConfig {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let _ = dotenv(); //for debugging mostly
        Self {
            data_dir: PathBuf::from(env_or_default_string("LASTONLINE_DATA_DIR", "plugins/LastOnline")),
            log_filter: var("LASTONLINE_LOG").ok().filter(|filter| !filter.is_empty()),
        }
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("plugins/LastOnline"),
            log_filter: None,
        }
    }
}

/// Parse environment variable string or return default value
fn env_or_default_string(key: &str, default: &str) -> String {
    var(key).unwrap_or_else(|_| default.to_string())
}

/// Read a YAML document, first writing `default_text` to `path` if the file is missing.
pub(crate) fn load_yaml_or_create<T: DeserializeOwned>(
    path: &Path,
    default_text: &str,
) -> Result<T, PluginError> {
    if !path.exists() {
        fs::write(path, default_text).map_err(PluginError::io(path))?;
        info!(path = %path.display(), "wrote default file");
    }

    let text = fs::read_to_string(path).map_err(PluginError::io(path))?;
    // An emptied file means "all defaults"
    let text = if text.trim().is_empty() { "{}" } else { text.as_str() };
    serde_yaml::from_str(text).map_err(|source| PluginError::Config {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.max_users, 100);
        assert_eq!(config.max_users_reporting, 10);
        assert_eq!(config.max_time_units, 3);
        assert!(config.count_online_players);
        assert!(!config.use_gui);
        assert_eq!(config.save_interval(), Duration::from_secs(300));
        assert_eq!(config.capacity(), Capacity::Limited(100));
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let shipped: Config = serde_yaml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(shipped, Config::default());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_yaml::from_str("MaxUsers: -1\nUseGUI: true\n").unwrap();
        assert_eq!(config.capacity(), Capacity::Unlimited);
        assert!(config.use_gui);
        assert_eq!(config.max_users_reporting, 10);
    }

    #[test]
    fn test_zero_save_interval_is_clamped() {
        let config = Config {
            save_interval_seconds: 0,
            ..Config::default()
        };
        assert_eq!(config.save_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        let config = Config::load_or_create(&path).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "\n").unwrap();

        assert_eq!(Config::load_or_create(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_load_or_create_reports_invalid_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "MaxUsersReporting: lots\n").unwrap();

        let result = Config::load_or_create(&path);

        assert!(matches!(result, Err(PluginError::Config { .. })));
    }
}
