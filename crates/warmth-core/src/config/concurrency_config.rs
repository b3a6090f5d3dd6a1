use serde::{Deserialize, Serialize};

use super::defaults;

/// Optimistic concurrency settings for anchor writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcurrencyConfig {
    /// Total compare-and-swap attempts before surfacing a conflict.
    pub max_cas_attempts: u32,
    /// Backoff before retry n is `backoff_base_ms * 2^(n-1)`.
    pub backoff_base_ms: u64,
}

impl Default for ConcurrencyConfig {
    fn default() -> Self {
        Self {
            max_cas_attempts: defaults::DEFAULT_MAX_CAS_ATTEMPTS,
            backoff_base_ms: defaults::DEFAULT_BACKOFF_BASE_MS,
        }
    }
}
