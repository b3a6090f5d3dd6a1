//! Top-level warmth configuration with layered resolution.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    BandConfig, BoostConfig, ConcurrencyConfig, DecayConfig, ObservabilityConfig, ServerConfig,
    StorageConfig,
};
use crate::constants::{SCORE_MAX, SCORE_MIN};
use crate::errors::ConfigError;
use crate::models::DecayMode;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`WARMTH_*`)
/// 3. Config file (`warmth.toml`)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WarmthConfig {
    pub decay: DecayConfig,
    pub bands: BandConfig,
    pub boost: BoostConfig,
    pub concurrency: ConcurrencyConfig,
    pub storage: StorageConfig,
    pub server: ServerConfig,
    pub observability: ObservabilityConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub db_path: Option<String>,
    pub bind: Option<String>,
    pub log_level: Option<String>,
    pub allow_test_mode: Option<bool>,
}

impl WarmthConfig {
    /// Load configuration with layered resolution. A missing `path` means
    /// "defaults only"; a `path` that does not exist is an error.
    pub fn load(path: Option<&Path>, cli: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;

        if let Some(cli) = cli {
            config.apply_cli_overrides(cli);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `WARMTH_*` overrides. `lookup` is injectable so tests don't
    /// have to mutate the process environment. Unparseable values are
    /// rejected rather than skipped.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("WARMTH_DB_PATH") {
            self.storage.db_path = v;
        }
        if let Some(v) = lookup("WARMTH_BIND") {
            self.server.bind = v;
        }
        if let Some(v) = lookup("WARMTH_LOG_LEVEL") {
            self.observability.log_level = v;
        }
        if let Some(v) = lookup("WARMTH_ALLOW_TEST_MODE") {
            self.decay.allow_test_mode = match v.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                other => {
                    return Err(invalid(
                        "WARMTH_ALLOW_TEST_MODE",
                        format!("expected true or false, got '{other}'"),
                    ))
                }
            };
        }
        if let Some(v) = lookup("WARMTH_DEFAULT_MODE") {
            self.decay.default_mode = v
                .parse::<DecayMode>()
                .map_err(|_| invalid("WARMTH_DEFAULT_MODE", format!("unknown decay mode '{v}'")))?;
        }
        Ok(())
    }

    pub fn apply_cli_overrides(&mut self, cli: &CliOverrides) {
        if let Some(ref db_path) = cli.db_path {
            self.storage.db_path = db_path.clone();
        }
        if let Some(ref bind) = cli.bind {
            self.server.bind = bind.clone();
        }
        if let Some(ref level) = cli.log_level {
            self.observability.log_level = level.clone();
        }
        if let Some(allow) = cli.allow_test_mode {
            self.decay.allow_test_mode = allow;
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for mode in DecayMode::ALL {
            let lambda = self.decay.lambda(mode);
            if !lambda.is_finite() || lambda <= 0.0 {
                return Err(invalid(
                    format!("decay.lambda_{mode}"),
                    "must be a positive finite number",
                ));
            }
        }
        if !(SCORE_MIN..=SCORE_MAX).contains(&self.decay.initial_score) {
            return Err(invalid("decay.initial_score", "must be between 0 and 100"));
        }
        if self.decay.default_mode == DecayMode::Test && !self.decay.allow_test_mode {
            return Err(invalid(
                "decay.default_mode",
                "test mode requires decay.allow_test_mode",
            ));
        }

        self.validate_bands()?;

        for (field, impulse) in self.boost.impulses() {
            if !impulse.is_finite() || impulse < 0.0 {
                return Err(invalid(field, "must be a non-negative finite number"));
            }
        }
        if self.concurrency.max_cas_attempts == 0 {
            return Err(invalid("concurrency.max_cas_attempts", "must be at least 1"));
        }
        if self.storage.read_pool_size == 0 {
            return Err(invalid("storage.read_pool_size", "must be at least 1"));
        }
        Ok(())
    }

    fn validate_bands(&self) -> Result<(), ConfigError> {
        let rows = &self.bands.thresholds;
        let Some(last) = rows.last() else {
            return Err(invalid("bands.thresholds", "must not be empty"));
        };

        let mut seen = HashSet::new();
        for pair in rows.windows(2) {
            if pair[1].min_score >= pair[0].min_score {
                return Err(invalid(
                    "bands.thresholds",
                    "min_score must be strictly descending",
                ));
            }
        }
        for row in rows {
            if !seen.insert(row.band) {
                return Err(invalid(
                    "bands.thresholds",
                    format!("band '{}' listed more than once", row.band),
                ));
            }
            if !(SCORE_MIN..=SCORE_MAX).contains(&row.min_score) {
                return Err(invalid("bands.thresholds", "min_score must be within [0, 100]"));
            }
        }
        if last.min_score != SCORE_MIN {
            return Err(invalid(
                "bands.thresholds",
                "last threshold must be 0 so every score classifies",
            ));
        }
        Ok(())
    }
}

fn invalid(field: impl Into<String>, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.into(),
        message: message.into(),
    }
}
