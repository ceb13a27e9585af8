//! Hosted store reads
//!
//! The store exposes each table through a PostgREST-style REST interface:
//! `GET {url}/rest/v1/{table}?select=*` with the public key sent both as
//! `apikey` and as a bearer token. Each table is read in full, once, with no
//! retries.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use winscript_core::types::{NetworkConfig, StoreConfig, TableNames};
use winscript_core::{Application, ApplicationOption, Catalog, Optimization, RuntimeConfig, Tweak};

use crate::join::{join, RawTables};

/// Loader for the hosted catalog store
pub struct RemoteCatalogLoader {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
    tables: TableNames,
}

impl RemoteCatalogLoader {
    /// Create a loader for `store`
    ///
    /// Fails when no store URL is configured.
    pub fn new(store: &StoreConfig, network: &NetworkConfig) -> Result<Self> {
        if store.url.trim().is_empty() {
            return Err(anyhow!(
                "No catalog store configured (set store.url or WINSCRIPT_STORE_URL)"
            ));
        }

        let client = reqwest::Client::builder()
            .user_agent(&network.user_agent)
            .timeout(Duration::from_secs(network.http_timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: store.url.trim_end_matches('/').to_string(),
            anon_key: store.anon_key.clone(),
            tables: store.tables.clone(),
        })
    }

    pub fn from_config(config: &RuntimeConfig) -> Result<Self> {
        Self::new(&config.store, &config.network)
    }

    /// Read the four tables and join them
    pub async fn load(&self) -> Result<Catalog> {
        info!("Loading catalog from {}", self.base_url);

        let (applications, application_options, optimizations, tweaks) = tokio::try_join!(
            self.fetch_table::<Application>(&self.tables.applications),
            self.fetch_table::<ApplicationOption>(&self.tables.application_options),
            self.fetch_table::<Optimization>(&self.tables.optimizations),
            self.fetch_table::<Tweak>(&self.tables.tweaks),
        )?;

        let (catalog, _) = join(RawTables {
            applications,
            application_options,
            optimizations,
            tweaks,
        });

        info!(
            "Loaded {} applications, {} optimizations, {} tweaks",
            catalog.applications.len(),
            catalog.optimizations.len(),
            catalog.tweaks.len()
        );
        Ok(catalog)
    }

    async fn fetch_table<T: DeserializeOwned>(&self, table: &str) -> Result<Vec<T>> {
        let url = format!("{}/rest/v1/{}?select=*", self.base_url, table);
        debug!("Fetching table {} from {}", table, url);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .with_context(|| format!("Failed to read table {}", table))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "Failed to read table {}: {}",
                table,
                response.status()
            ));
        }

        let rows: Vec<T> = response
            .json()
            .await
            .with_context(|| format!("Table {} returned malformed rows", table))?;

        debug!("Table {} returned {} rows", table, rows.len());
        Ok(rows)
    }
}
