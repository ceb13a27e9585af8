//! # winscript-server
//!
//! HTTP surface of winscript:
//! - `POST /api/generate-script` assembles a script from explicit selections
//! - `GET /api/catalog` serves the loaded catalog
//! - `GET /api/state` and `POST /api/state` decode and encode URL state tokens
//! - `GET /api/health` reports the catalog load state

pub mod routes;
pub mod state;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;
use winscript_catalog::CatalogHandle;
use winscript_core::RuntimeConfig;

pub use routes::build_router;
pub use state::ServerState;

/// Bind the configured address and serve until Ctrl-C
pub async fn run_server(config: &RuntimeConfig, catalog: CatalogHandle) -> Result<()> {
    let bind_addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address '{}': expected host:port", config.server.bind))?;

    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;

    let state = ServerState::new(catalog, &config.url_state.param)?;
    serve(listener, state).await
}

/// Serve on an already bound listener until Ctrl-C
pub async fn serve(listener: TcpListener, state: ServerState) -> Result<()> {
    let local_addr = listener
        .local_addr()
        .context("Failed to resolve listen address")?;
    info!("Listening on http://{}", local_addr);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await
        .context("Server exited unexpectedly")?;
    Ok(())
}
