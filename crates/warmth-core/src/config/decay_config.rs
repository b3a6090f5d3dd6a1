use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::DecayMode;

/// Decay subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    /// λ per day for each mode.
    pub lambda_slow: f64,
    pub lambda_medium: f64,
    pub lambda_fast: f64,
    pub lambda_test: f64,
    /// Mode assigned to newly created anchors.
    pub default_mode: DecayMode,
    /// Score assigned to newly created anchors.
    pub initial_score: f64,
    /// Whether callers may select the debug-only `test` mode.
    pub allow_test_mode: bool,
}

impl DecayConfig {
    pub fn lambda(&self, mode: DecayMode) -> f64 {
        match mode {
            DecayMode::Slow => self.lambda_slow,
            DecayMode::Medium => self.lambda_medium,
            DecayMode::Fast => self.lambda_fast,
            DecayMode::Test => self.lambda_test,
        }
    }

    /// Modes callers may switch to under this configuration.
    pub fn selectable_modes(&self) -> Vec<DecayMode> {
        DecayMode::ALL
            .into_iter()
            .filter(|m| m.is_user_selectable() || self.allow_test_mode)
            .collect()
    }
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            lambda_slow: defaults::DEFAULT_LAMBDA_SLOW,
            lambda_medium: defaults::DEFAULT_LAMBDA_MEDIUM,
            lambda_fast: defaults::DEFAULT_LAMBDA_FAST,
            lambda_test: defaults::DEFAULT_LAMBDA_TEST,
            default_mode: defaults::DEFAULT_MODE,
            initial_score: defaults::DEFAULT_INITIAL_SCORE,
            allow_test_mode: defaults::DEFAULT_ALLOW_TEST_MODE,
        }
    }
}
