//! Wiremock helpers for the hosted store

use serde_json::Value;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use winscript_core::types::{NetworkConfig, StoreConfig};

use super::fixtures::*;

/// Serve `rows` for `table`, only to requests carrying the test key
pub async fn mock_table(server: &MockServer, table: &str, rows: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/rest/v1/{}", table)))
        .and(query_param("select", "*"))
        .and(header("apikey", ANON_KEY))
        .and(header("authorization", format!("Bearer {}", ANON_KEY).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(rows))
        .mount(server)
        .await;
}

/// Make `table` fail with `status`
pub async fn mock_failing_table(server: &MockServer, table: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/rest/v1/{}", table)))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Serve all four fixture tables
pub async fn mock_full_store(server: &MockServer) {
    mock_table(server, "applications", application_rows()).await;
    mock_table(server, "application_options", option_rows()).await;
    mock_table(server, "optimizations", optimization_rows()).await;
    mock_table(server, "tweaks", tweak_rows()).await;
}

pub fn store_config(server: &MockServer) -> StoreConfig {
    StoreConfig {
        url: format!("{}/", server.uri()),
        anon_key: ANON_KEY.to_string(),
        ..Default::default()
    }
}

pub fn network_config() -> NetworkConfig {
    NetworkConfig {
        http_timeout_secs: 5,
        ..Default::default()
    }
}
