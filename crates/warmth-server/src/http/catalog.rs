//! Contact-independent endpoints: health, mode and band catalogues, summary.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use warmth_core::config::BandThreshold;
use warmth_core::constants::VERSION;
use warmth_scoring::{ModeListing, WarmthSummary};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub(super) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: VERSION,
    })
}

pub(super) async fn modes(State(state): State<AppState>) -> Json<ModeListing> {
    Json(state.service().modes())
}

pub(super) async fn bands(State(state): State<AppState>) -> Json<Vec<BandThreshold>> {
    Json(state.service().bands().to_vec())
}

pub(super) async fn summary(State(state): State<AppState>) -> Result<Json<WarmthSummary>, ApiError> {
    state.call(|service| service.summary()).await.map(Json)
}
