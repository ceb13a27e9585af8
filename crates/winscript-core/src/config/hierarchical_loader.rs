//! Hierarchical configuration loader with precedence
//!
//! Loads configuration from multiple sources with the following precedence (low to high):
//! 1. Embedded defaults (built into binary)
//! 2. User config (~/.winscript/config.yaml)
//! 3. Environment variables (WINSCRIPT_* prefix)
//! 4. CLI flags (handled by caller)

use crate::error::{Error, Result};
use crate::types::RuntimeConfig;
use crate::utils::get_home_dir;
use camino::{Utf8Path, Utf8PathBuf};
use rust_embed::RustEmbed;
use serde::de::DeserializeOwned;
use std::env;
use std::fs;
use tracing::debug;

/// Directory under the home directory holding user configuration
pub const CONFIG_DIR_NAME: &str = ".winscript";

/// User configuration file name
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Embedded configuration files
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../embedded/config/"]
#[prefix = ""]
struct EmbeddedConfigs;

/// Configuration hierarchy loader
pub struct HierarchicalConfigLoader {
    /// Base directory for configuration files
    config_dir: Utf8PathBuf,
}

impl HierarchicalConfigLoader {
    /// Create a loader rooted at ~/.winscript
    pub fn new() -> Result<Self> {
        let home = get_home_dir().map_err(|e| Error::invalid_config(e.to_string()))?;
        let home = Utf8PathBuf::try_from(home)
            .map_err(|_| Error::invalid_config("Home directory path is not valid UTF-8"))?;

        Ok(Self {
            config_dir: home.join(CONFIG_DIR_NAME),
        })
    }

    /// Create a loader with a custom config directory
    pub fn with_dir(config_dir: Utf8PathBuf) -> Self {
        Self { config_dir }
    }

    /// Directory searched for the user config file
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    /// Load runtime configuration with hierarchical precedence
    pub fn load_runtime_config(&self) -> Result<RuntimeConfig> {
        let mut config = Self::load_embedded_config::<RuntimeConfig>("runtime-defaults.yaml")?;

        let user_config_path = self.config_dir.join(CONFIG_FILE_NAME);
        if user_config_path.exists() {
            debug!("Loading user config from {}", user_config_path);
            let file_config = Self::load_yaml_file::<RuntimeConfig>(&user_config_path)?;
            config = Self::merge_runtime_config(config, file_config);
        }

        Self::apply_env_overrides(config)
    }

    /// Load an embedded configuration file
    fn load_embedded_config<T: DeserializeOwned>(filename: &str) -> Result<T> {
        let embedded_file = EmbeddedConfigs::get(filename).ok_or_else(|| {
            Error::config_not_found(format!("Embedded config not found: {}", filename))
        })?;

        let content = std::str::from_utf8(&embedded_file.data).map_err(|_| {
            Error::invalid_config(format!("Invalid UTF-8 in embedded config: {}", filename))
        })?;

        serde_yaml_ng::from_str(content).map_err(|e| {
            Error::invalid_config(format!(
                "Failed to parse embedded config {}: {}",
                filename, e
            ))
        })
    }

    /// Load a YAML file and parse it
    fn load_yaml_file<T: DeserializeOwned>(path: &Utf8Path) -> Result<T> {
        let content = fs::read_to_string(path)?;
        serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))
    }

    /// Merge two runtime configs (base is overridden by overlay)
    ///
    /// Empty store credentials in the overlay keep the base values.
    fn merge_runtime_config(base: RuntimeConfig, overlay: RuntimeConfig) -> RuntimeConfig {
        let mut store = overlay.store;
        if store.url.is_empty() {
            store.url = base.store.url;
        }
        if store.anon_key.is_empty() {
            store.anon_key = base.store.anon_key;
        }

        RuntimeConfig {
            store,
            network: overlay.network,
            server: overlay.server,
            url_state: overlay.url_state,
        }
    }

    /// Apply environment variable overrides to runtime config
    fn apply_env_overrides(mut config: RuntimeConfig) -> Result<RuntimeConfig> {
        if let Ok(val) = env::var("WINSCRIPT_STORE_URL") {
            config.store.url = val;
        }

        if let Ok(val) = env::var("WINSCRIPT_STORE_KEY") {
            config.store.anon_key = val;
        }

        if let Ok(val) = env::var("WINSCRIPT_BIND") {
            config.server.bind = val;
        }

        if let Ok(val) = env::var("WINSCRIPT_HTTP_TIMEOUT_SECS") {
            config.network.http_timeout_secs = val.parse().map_err(|_| {
                Error::invalid_config("WINSCRIPT_HTTP_TIMEOUT_SECS must be a valid number")
            })?;
        }

        if let Ok(val) = env::var("WINSCRIPT_DEBOUNCE_MS") {
            config.url_state.debounce_ms = val.parse().map_err(|_| {
                Error::invalid_config("WINSCRIPT_DEBOUNCE_MS must be a valid number")
            })?;
        }

        if let Ok(val) = env::var("WINSCRIPT_STATE_PARAM") {
            if val.is_empty() {
                return Err(Error::invalid_config("WINSCRIPT_STATE_PARAM must not be empty"));
            }
            config.url_state.param = val;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    const ENV_VARS: &[&str] = &[
        "WINSCRIPT_STORE_URL",
        "WINSCRIPT_STORE_KEY",
        "WINSCRIPT_BIND",
        "WINSCRIPT_HTTP_TIMEOUT_SECS",
        "WINSCRIPT_DEBOUNCE_MS",
        "WINSCRIPT_STATE_PARAM",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            env::remove_var(var);
        }
    }

    fn loader_in(dir: &TempDir) -> HierarchicalConfigLoader {
        HierarchicalConfigLoader::with_dir(Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap())
    }

    #[test]
    #[serial]
    fn test_embedded_defaults() {
        clear_env();
        let dir = TempDir::new().unwrap();
        let config = loader_in(&dir).load_runtime_config().unwrap();

        assert_eq!(config.url_state.param, "state");
        assert_eq!(config.url_state.debounce_ms, 500);
        assert_eq!(config.server.bind, "127.0.0.1:3000");
        assert_eq!(config.network.http_timeout_secs, 30);
        assert!(config.network.user_agent.starts_with("winscript/"));
        assert!(config.store.url.is_empty());
    }

    #[test]
    #[serial]
    fn test_user_file_overrides_defaults() {
        clear_env();
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "store:\n  url: https://store.example.com\n  anon-key: key\nurl-state:\n  debounce-ms: 100\n",
        )
        .unwrap();

        let config = loader_in(&dir).load_runtime_config().unwrap();
        assert_eq!(config.store.url, "https://store.example.com");
        assert_eq!(config.store.anon_key, "key");
        assert_eq!(config.url_state.debounce_ms, 100);
        assert_eq!(config.url_state.param, "state");
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        clear_env();
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "store:\n  url: https://file.example.com\n",
        )
        .unwrap();

        env::set_var("WINSCRIPT_STORE_URL", "https://env.example.com");
        env::set_var("WINSCRIPT_BIND", "0.0.0.0:8080");
        let config = loader_in(&dir).load_runtime_config().unwrap();
        clear_env();

        assert_eq!(config.store.url, "https://env.example.com");
        assert_eq!(config.server.bind, "0.0.0.0:8080");
    }

    #[test]
    #[serial]
    fn test_invalid_env_number_is_rejected() {
        clear_env();
        let dir = TempDir::new().unwrap();

        env::set_var("WINSCRIPT_DEBOUNCE_MS", "soon");
        let result = loader_in(&dir).load_runtime_config();
        clear_env();

        let err = result.unwrap_err();
        assert!(err.to_string().contains("WINSCRIPT_DEBOUNCE_MS"));
    }

    #[test]
    #[serial]
    fn test_malformed_user_file_is_an_error() {
        clear_env();
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "store: [not, a, map]\n").unwrap();

        let err = loader_in(&dir).load_runtime_config().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }
}
