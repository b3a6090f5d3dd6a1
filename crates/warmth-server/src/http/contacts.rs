//! Per-contact warmth endpoints.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use warmth_core::models::{Channel, DecayMode, Direction, InteractionEvent, ModeChangeLogEntry};
use warmth_scoring::{
    BoostOutcome, ConsistencyReport, Forecast, ModeReading, ModeSwitchResult, WarmthReading,
};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CreateAnchorRequest {
    pub mode: Option<String>,
    pub score: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct SwitchModeRequest {
    pub mode: String,
}

/// Interaction hook payload. Enum fields arrive as strings so that bad
/// values are reported as validation errors.
#[derive(Debug, Deserialize)]
pub struct InteractionRequest {
    pub occurred_at: String,
    pub channel: String,
    pub direction: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    pub target: Option<f64>,
}

pub(super) async fn read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<WarmthReading>, ApiError> {
    state.call(move |service| service.read(&id)).await.map(Json)
}

pub(super) async fn create(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<WarmthReading>), ApiError> {
    // An empty body means defaults; anything else must parse.
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        CreateAnchorRequest::default()
    } else {
        Json::<CreateAnchorRequest>::from_bytes(&body)
            .map(|Json(r)| r)
            .map_err(|rejection| ApiError::bad_request("body", rejection.body_text()))?
    };
    let mode = request
        .mode
        .as_deref()
        .map(str::parse::<DecayMode>)
        .transpose()?;
    let score = request.score;

    let reading = state
        .call(move |service| service.create_anchor(&id, mode, score))
        .await?;
    Ok((StatusCode::CREATED, Json(reading)))
}

pub(super) async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.call(move |service| service.delete_anchor(&id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(super) async fn current_mode(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ModeReading>, ApiError> {
    state.call(move |service| service.current_mode(&id)).await.map(Json)
}

pub(super) async fn switch_mode(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SwitchModeRequest>,
) -> Result<Json<ModeSwitchResult>, ApiError> {
    let mode: DecayMode = request.mode.parse()?;
    state
        .call(move |service| service.switch_mode(&id, mode))
        .await
        .map(Json)
}

pub(super) async fn interaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<InteractionRequest>,
) -> Result<Json<BoostOutcome>, ApiError> {
    let occurred_at = DateTime::parse_from_rfc3339(&request.occurred_at)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| ApiError::bad_request("occurred_at", format!("not an RFC 3339 timestamp: {e}")))?;
    let event = InteractionEvent {
        contact_id: id,
        occurred_at,
        channel: request.channel.parse::<Channel>()?,
        direction: request
            .direction
            .as_deref()
            .map(str::parse::<Direction>)
            .transpose()?
            .unwrap_or(Direction::Outbound),
    };

    state
        .call(move |service| service.on_interaction(&event))
        .await
        .map(Json)
}

pub(super) async fn mode_changes(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ModeChangeLogEntry>>, ApiError> {
    state.call(move |service| service.mode_changes(&id)).await.map(Json)
}

pub(super) async fn consistency(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ConsistencyReport>, ApiError> {
    state.call(move |service| service.consistency(&id)).await.map(Json)
}

pub(super) async fn forecast(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ForecastQuery>,
) -> Result<Json<Forecast>, ApiError> {
    let target = query
        .target
        .ok_or_else(|| ApiError::bad_request("target", "query parameter is required"))?;
    state
        .call(move |service| service.forecast(&id, target))
        .await
        .map(Json)
}
