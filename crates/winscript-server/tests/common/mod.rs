//! Common test infrastructure for winscript-server tests
//!
//! Servers are bound on an ephemeral local port and driven with reqwest.

#![allow(dead_code)]

use std::future::pending;
use std::net::SocketAddr;

use anyhow::anyhow;
use tokio::net::TcpListener;
use winscript_catalog::CatalogHandle;
use winscript_core::{Application, ApplicationOption, Catalog, Optimization, Tweak};
use winscript_server::{build_router, ServerState};

/// Serve `catalog` on an ephemeral port and return its base URL
pub async fn spawn_server(catalog: CatalogHandle) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    let state = ServerState::new(catalog, "state").unwrap();

    tokio::spawn(async move {
        axum::serve(listener, build_router(state)).await.unwrap();
    });

    format!("http://{}", addr)
}

/// A catalog handle that never leaves `Loading`
pub fn loading_catalog() -> CatalogHandle {
    CatalogHandle::spawn_load(|| pending::<anyhow::Result<Catalog>>())
}

/// A catalog handle whose load failed
pub async fn failed_catalog(message: &'static str) -> CatalogHandle {
    let handle = CatalogHandle::spawn_load(move || async move { Err::<Catalog, _>(anyhow!(message)) });
    handle.wait_settled().await;
    handle
}

pub fn vlc() -> Application {
    Application {
        id: "vlc".to_string(),
        name: "VLC".to_string(),
        category: "Media".to_string(),
        description: "Media player".to_string(),
        image_url: String::new(),
        download_url: "https://downloads.example.com/vlc.exe".to_string(),
        install_args: "/S".to_string(),
        options: Vec::new(),
        version: None,
    }
}

pub fn java() -> Application {
    Application {
        id: "java".to_string(),
        name: "Java".to_string(),
        category: "Development".to_string(),
        description: String::new(),
        image_url: String::new(),
        download_url: "https://downloads.example.com/java".to_string(),
        install_args: String::new(),
        options: vec![ApplicationOption {
            id: "java-21".to_string(),
            name: "OpenJDK 21.0.2".to_string(),
            application_id: "java".to_string(),
            download_url: "https://downloads.example.com/java/21".to_string(),
            install_args: String::new(),
        }],
        version: None,
    }
}

pub fn sample_catalog() -> Catalog {
    Catalog {
        applications: vec![java(), vlc()],
        optimizations: vec![Optimization {
            id: "telemetry".to_string(),
            name: "Disable telemetry".to_string(),
            description: String::new(),
            script: "Stop-Service DiagTrack".to_string(),
        }],
        tweaks: vec![Tweak {
            id: "file-ext".to_string(),
            name: "Show file extensions".to_string(),
            category: "Explorer".to_string(),
            description: String::new(),
            long_description: String::new(),
            command: "Set-ItemProperty -Name HideFileExt -Value 0".to_string(),
        }],
    }
}
