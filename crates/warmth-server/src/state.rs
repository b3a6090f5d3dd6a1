//! Shared server state.

use std::sync::Arc;

use warmth_core::errors::WarmthResult;
use warmth_scoring::ScoringService;

use crate::error::ApiError;

#[derive(Clone)]
pub struct AppState {
    service: Arc<ScoringService>,
}

impl AppState {
    pub fn new(service: ScoringService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    pub fn service(&self) -> &ScoringService {
        &self.service
    }

    /// Run a service call on the blocking pool.
    pub async fn call<F, T>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&ScoringService) -> WarmthResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let service = Arc::clone(&self.service);
        tokio::task::spawn_blocking(move || f(&service))
            .await
            .map_err(|e| ApiError::internal(format!("scoring task failed: {e}")))?
            .map_err(ApiError::from)
    }
}
