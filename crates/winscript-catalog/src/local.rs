//! Local catalog files
//!
//! A catalog file is JSON, or YAML when the extension is `.yaml`/`.yml`. It
//! holds either the joined catalog (applications with inline `options`) or
//! the four raw tables; both shapes go through the same join.

use anyhow::{Context, Result};
use camino::Utf8Path;
use tracing::{debug, info};
use winscript_core::Catalog;

use crate::join::{join, RawTables};

/// Load and join a catalog file
pub fn load_local(path: &Utf8Path) -> Result<Catalog> {
    debug!("Loading catalog file {}", path);
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file {}", path))?;

    let tables: RawTables = match path.extension() {
        Some("yaml") | Some("yml") => serde_yaml_ng::from_str(&content)
            .with_context(|| format!("Failed to parse catalog file {}", path))?,
        _ => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse catalog file {}", path))?,
    };

    let (catalog, _) = join(tables);
    info!(
        "Loaded {} applications, {} optimizations, {} tweaks from {}",
        catalog.applications.len(),
        catalog.optimizations.len(),
        catalog.tweaks.len(),
        path
    );
    Ok(catalog)
}
