use axum::{extract::State, Json};
use serde::Serialize;
use super::AppState;
use crate::constants::{ALIVE_MESSAGE, API_VERSION};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub api_version: String,
    pub identities: usize,
}

/// GET /
pub async fn alive() -> &'static str {
    ALIVE_MESSAGE
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        api_version: API_VERSION.to_string(),
        identities: state.registry.len().await,
    })
}
