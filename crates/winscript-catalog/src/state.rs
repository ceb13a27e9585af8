//! Catalog load state
//!
//! The catalog is loaded exactly once per process. Consumers observe the
//! progress through a [`CatalogHandle`]: `Loading` until the single load
//! settles, then `Ready` or `Failed` for good.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{error, info};
use winscript_core::Catalog;

#[derive(Debug, Clone)]
pub enum LoadState {
    Loading,
    Ready(Arc<Catalog>),
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    /// The catalog, once ready
    pub fn catalog(&self) -> Option<Arc<Catalog>> {
        match self {
            LoadState::Ready(catalog) => Some(Arc::clone(catalog)),
            _ => None,
        }
    }
}

/// Shared view of the catalog load
#[derive(Debug, Clone)]
pub struct CatalogHandle {
    rx: watch::Receiver<LoadState>,
}

impl CatalogHandle {
    /// Start the one load in the background
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_load<F, Fut>(load: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<Catalog>> + Send + 'static,
    {
        let (tx, rx) = watch::channel(LoadState::Loading);

        tokio::spawn(async move {
            let settled = match load().await {
                Ok(catalog) => {
                    info!("Catalog ready");
                    LoadState::Ready(Arc::new(catalog))
                }
                Err(e) => {
                    error!("Catalog load failed: {:#}", e);
                    LoadState::Failed(format!("{:#}", e))
                }
            };
            // Receivers keep the last value after the sender is gone
            let _ = tx.send(settled);
        });

        Self { rx }
    }

    /// A handle for a catalog that is already loaded
    pub fn ready(catalog: Catalog) -> Self {
        let (_tx, rx) = watch::channel(LoadState::Ready(Arc::new(catalog)));
        Self { rx }
    }

    /// Snapshot of the current state
    pub fn current(&self) -> LoadState {
        self.rx.borrow().clone()
    }

    /// Wait until the load has settled
    pub async fn wait_settled(&self) -> LoadState {
        let mut rx = self.rx.clone();
        let settled = match rx.wait_for(|state| !state.is_loading()).await {
            Ok(state) => state.clone(),
            Err(_) => LoadState::Failed("Catalog load ended without a result".to_string()),
        };
        settled
    }
}
