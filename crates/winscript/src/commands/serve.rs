//! Serve command

use anyhow::Result;
use camino::Utf8Path;
use tracing::info;
use winscript_catalog::{load_local, CatalogHandle, RemoteCatalogLoader};

use super::load_runtime_config;
use crate::cli::ServeArgs;

pub async fn run(args: ServeArgs, config_dir: Option<&Utf8Path>) -> Result<()> {
    let mut config = load_runtime_config(config_dir)?;
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }

    // The endpoint answers as soon as it is bound; catalog routes report 503
    // until the load settles
    let catalog = match args.source.catalog_file {
        Some(path) => {
            info!("Serving catalog from {}", path);
            CatalogHandle::spawn_load(move || async move {
                tokio::task::spawn_blocking(move || load_local(&path)).await?
            })
        }
        None => {
            let loader = RemoteCatalogLoader::from_config(&config)?;
            CatalogHandle::spawn_load(move || async move { loader.load().await })
        }
    };

    winscript_server::run_server(&config, catalog).await
}
