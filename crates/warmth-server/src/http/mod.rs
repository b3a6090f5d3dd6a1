//! HTTP routes.

mod catalog;
mod contacts;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

pub use catalog::HealthResponse;
pub use contacts::{CreateAnchorRequest, ForecastQuery, InteractionRequest, SwitchModeRequest};

/// Create the HTTP router with all routes configured.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(catalog::health))
        .route("/warmth/modes", get(catalog::modes))
        .route("/warmth/bands", get(catalog::bands))
        .route("/warmth/summary", get(catalog::summary))
        .route(
            "/contacts/:id/warmth",
            get(contacts::read)
                .post(contacts::create)
                .delete(contacts::delete),
        )
        .route(
            "/contacts/:id/warmth/mode",
            get(contacts::current_mode).patch(contacts::switch_mode),
        )
        .route(
            "/contacts/:id/warmth/interactions",
            axum::routing::post(contacts::interaction),
        )
        .route("/contacts/:id/warmth/mode-changes", get(contacts::mode_changes))
        .route("/contacts/:id/warmth/consistency", get(contacts::consistency))
        .route("/contacts/:id/warmth/forecast", get(contacts::forecast))
        .with_state(state)
}
