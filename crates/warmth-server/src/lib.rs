//! # warmth-server
//!
//! axum HTTP boundary over [`ScoringService`]. The service is synchronous,
//! so every handler hops onto the blocking pool.
//!
//! [`ScoringService`]: warmth_scoring::ScoringService

pub mod error;
pub mod http;
pub mod state;
pub mod tracing_setup;

use tokio::net::TcpListener;

pub use error::{ApiError, ServerError};
pub use http::create_router;
pub use state::AppState;

/// Bind `addr` and serve until ctrl-c.
pub async fn serve(state: AppState, addr: &str) -> Result<(), ServerError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.to_string(),
            source,
        })?;
    tracing::info!(addr, "warmth server listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        return std::future::pending().await;
    }
    tracing::info!("shutting down");
}
