//! Runtime configuration types
//!
//! These types define where the catalog comes from, how HTTP is done, where
//! the endpoint binds and how the URL token is persisted.

use serde::{Deserialize, Serialize};

/// Complete runtime configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RuntimeConfig {
    /// Hosted catalog store
    #[serde(default)]
    pub store: StoreConfig,

    /// Network and HTTP configuration
    #[serde(default)]
    pub network: NetworkConfig,

    /// Script-generation endpoint
    #[serde(default)]
    pub server: ServerConfig,

    /// Address-bar token persistence
    #[serde(default)]
    pub url_state: UrlStateConfig,
}

/// Hosted catalog store (PostgREST-style REST interface)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StoreConfig {
    /// Base URL of the store, e.g. `https://<project>.supabase.co`
    #[serde(default)]
    pub url: String,

    /// Public (anonymous) API key sent with every read
    #[serde(default)]
    pub anon_key: String,

    /// Table names
    #[serde(default)]
    pub tables: TableNames,
}

/// Names of the four catalog tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TableNames {
    #[serde(default = "default_applications_table")]
    pub applications: String,
    #[serde(default = "default_options_table")]
    pub application_options: String,
    #[serde(default = "default_optimizations_table")]
    pub optimizations: String,
    #[serde(default = "default_tweaks_table")]
    pub tweaks: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            applications: default_applications_table(),
            application_options: default_options_table(),
            optimizations: default_optimizations_table(),
            tweaks: default_tweaks_table(),
        }
    }
}

fn default_applications_table() -> String {
    "applications".to_string()
}
fn default_options_table() -> String {
    "application_options".to_string()
}
fn default_optimizations_table() -> String {
    "optimizations".to_string()
}
fn default_tweaks_table() -> String {
    "tweaks".to_string()
}

/// Network and HTTP configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NetworkConfig {
    /// HTTP timeout in seconds
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,

    /// User agent string for HTTP requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            http_timeout_secs: default_http_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_http_timeout() -> u64 {
    30
}
fn default_user_agent() -> String {
    format!(
        "winscript/{} ({}; {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

/// Script-generation endpoint settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ServerConfig {
    /// Socket address to bind
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

/// Address-bar token persistence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UrlStateConfig {
    /// Query parameter carrying the token
    #[serde(default = "default_param")]
    pub param: String,

    /// Quiet window before a changed selection is written back
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for UrlStateConfig {
    fn default() -> Self {
        Self {
            param: default_param(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_param() -> String {
    "state".to_string()
}
fn default_debounce_ms() -> u64 {
    500
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_yields_defaults() {
        let config: RuntimeConfig = serde_yaml_ng::from_str("{}").unwrap();
        assert_eq!(config, RuntimeConfig::default());
        assert_eq!(config.url_state.param, "state");
        assert_eq!(config.url_state.debounce_ms, 500);
        assert_eq!(config.store.tables.application_options, "application_options");
    }

    #[test]
    fn test_kebab_case_fields() {
        let yaml = r#"
store:
  url: https://store.example.com
  anon-key: abc
network:
  http-timeout-secs: 5
url-state:
  debounce-ms: 250
"#;
        let config: RuntimeConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.store.url, "https://store.example.com");
        assert_eq!(config.store.anon_key, "abc");
        assert_eq!(config.network.http_timeout_secs, 5);
        assert_eq!(config.url_state.debounce_ms, 250);
        assert_eq!(config.server.bind, "127.0.0.1:3000");
    }
}
