//! Route table and handlers

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error, info};
use url::form_urlencoded;
use winscript_catalog::LoadState;
use winscript_core::url_state::{validate_applications, validate_optimizations, validate_tweaks};
use winscript_core::{Application, Catalog, GenerateScriptRequest, Optimization, Tweak, UrlState};

use crate::state::ServerState;

pub const GENERATE_SCRIPT_ENDPOINT: &str = "/api/generate-script";
pub const CATALOG_ENDPOINT: &str = "/api/catalog";
pub const STATE_ENDPOINT: &str = "/api/state";
pub const HEALTH_ENDPOINT: &str = "/api/health";

/// A validated selection decoded from a token
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateResponse {
    pub apps: Vec<Application>,
    pub optimizations: Vec<Optimization>,
    pub tweaks: Vec<Tweak>,
    /// Entries removed because the catalog no longer has them
    pub dropped: usize,
}

/// Token for a selection, plus the query string carrying it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    pub query: String,
}

pub fn build_router(state: ServerState) -> Router {
    Router::new()
        .route(
            GENERATE_SCRIPT_ENDPOINT,
            post(handle_generate_script).fallback(handle_method_not_allowed),
        )
        .route(CATALOG_ENDPOINT, get(handle_catalog))
        .route(STATE_ENDPOINT, get(handle_read_state).post(handle_encode_state))
        .route(HEALTH_ENDPOINT, get(handle_health))
        .with_state(state)
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

/// The ready catalog, or the response to send while there is none
fn ready_catalog(state: &ServerState) -> Result<std::sync::Arc<Catalog>, Response> {
    match state.catalog.current() {
        LoadState::Ready(catalog) => Ok(catalog),
        LoadState::Loading => Err(error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "Catalog is still loading",
        )),
        LoadState::Failed(message) => Err(error_response(StatusCode::BAD_GATEWAY, message)),
    }
}

async fn handle_generate_script(
    State(state): State<ServerState>,
    Json(request): Json<GenerateScriptRequest>,
) -> Response {
    match state.assembler.assemble_request(&request) {
        Ok(response) => {
            info!(
                "Generated script for {} applications, {} optimizations, {} tweaks",
                request.selected_apps.len(),
                request.selected_optimizations.len(),
                request.selected_tweaks.len()
            );
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Script assembly failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

async fn handle_method_not_allowed() -> StatusCode {
    StatusCode::METHOD_NOT_ALLOWED
}

async fn handle_catalog(State(state): State<ServerState>) -> Response {
    match ready_catalog(&state) {
        Ok(catalog) => (StatusCode::OK, Json(catalog.as_ref().clone())).into_response(),
        Err(response) => response,
    }
}

async fn handle_read_state(
    State(state): State<ServerState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let catalog = match ready_catalog(&state) {
        Ok(catalog) => catalog,
        Err(response) => return response,
    };

    let Some(decoded) = params
        .get(state.state_param.as_ref())
        // Form decoding turns an unescaped '+' into a space
        .map(|token| token.replace(' ', "+"))
        .and_then(|token| UrlState::decode(&token))
    else {
        debug!("No usable token in request, returning an empty selection");
        return (StatusCode::OK, Json(StateResponse::default())).into_response();
    };

    let apps = validate_applications(&decoded.apps, &catalog);
    let optimizations = validate_optimizations(&decoded.optimizations, &catalog);
    let tweaks = validate_tweaks(&decoded.tweaks, &catalog);

    let response = StateResponse {
        dropped: apps.dropped + optimizations.dropped + tweaks.dropped,
        apps: apps.kept,
        optimizations: optimizations.kept,
        tweaks: tweaks.kept,
    };
    (StatusCode::OK, Json(response)).into_response()
}

async fn handle_encode_state(
    State(state): State<ServerState>,
    Json(selection): Json<UrlState>,
) -> Response {
    match selection.encode() {
        Ok(token) => {
            let query = form_urlencoded::Serializer::new(String::new())
                .append_pair(&state.state_param, &token)
                .finish();
            (StatusCode::OK, Json(TokenResponse { token, query })).into_response()
        }
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

async fn handle_health(State(state): State<ServerState>) -> Response {
    let catalog = match state.catalog.current() {
        LoadState::Loading => "loading",
        LoadState::Ready(_) => "ready",
        LoadState::Failed(_) => "failed",
    };
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "catalog": catalog,
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
        .into_response()
}
