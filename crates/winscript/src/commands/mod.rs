//! CLI command implementations

pub mod catalog;
pub mod completions;
pub mod generate;
pub mod java;
pub mod serve;
pub mod token;
pub mod version;

use anyhow::{Context, Result};
use camino::Utf8Path;
use tracing::debug;
use url::Url;
use winscript_catalog::{load_local, RemoteCatalogLoader};
use winscript_core::url_state::read_token;
use winscript_core::{Catalog, HierarchicalConfigLoader, RuntimeConfig};

use crate::cli::CatalogSource;
use crate::output;

/// Load runtime configuration, optionally from a custom directory
pub(crate) fn load_runtime_config(config_dir: Option<&Utf8Path>) -> Result<RuntimeConfig> {
    let loader = match config_dir {
        Some(dir) => HierarchicalConfigLoader::with_dir(dir.to_path_buf()),
        None => HierarchicalConfigLoader::new().context("Failed to locate config directory")?,
    };
    debug!("Using config directory {}", loader.config_dir());
    loader
        .load_runtime_config()
        .context("Failed to load runtime config")
}

/// Load the catalog from the local file when given, the hosted store otherwise
pub(crate) async fn load_catalog(config: &RuntimeConfig, source: &CatalogSource) -> Result<Catalog> {
    if let Some(path) = &source.catalog_file {
        return load_local(path);
    }

    let loader = RemoteCatalogLoader::from_config(config)?;
    let spinner = output::spinner("Loading catalog...");
    let result = loader.load().await;
    spinner.finish_and_clear();
    result
}

/// Accept either a bare token or a link carrying one in `param`
pub(crate) fn extract_token(input: &str, param: &str) -> String {
    let input = input.trim();
    match Url::parse(input) {
        Ok(url) => read_token(&url, param).unwrap_or_default(),
        Err(_) => input.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_token_from_link_or_bare() {
        assert_eq!(
            extract_token("https://example.com/?state=eyJhIjoxfQ%3D%3D", "state"),
            "eyJhIjoxfQ=="
        );
        assert_eq!(extract_token("  eyJhIjoxfQ==\n", "state"), "eyJhIjoxfQ==");
        assert_eq!(extract_token("https://example.com/?other=1", "state"), "");
    }
}
