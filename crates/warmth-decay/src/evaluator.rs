use chrono::{DateTime, Utc};
use serde::Serialize;

use warmth_core::config::DecayConfig;
use warmth_core::models::{Anchor, DecayMode};

use crate::formula::{self, Reach};

/// `now` was earlier than the anchor instant. Elapsed time was floored at
/// zero; the caller is expected to log this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClockSkew {
    pub anchor_at: DateTime<Utc>,
    pub now: DateTime<Utc>,
    pub skew_ms: i64,
}

/// A score read at a specific instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Evaluation {
    pub score: f64,
    pub elapsed_days: f64,
    pub clock_skew: Option<ClockSkew>,
}

/// Pure `(anchor, now) → score` evaluation with per-mode decay rates.
#[derive(Debug, Clone)]
pub struct DecayEvaluator {
    lambdas: [f64; 4],
}

impl DecayEvaluator {
    pub fn new(config: &DecayConfig) -> Self {
        Self {
            lambdas: DecayMode::ALL.map(|m| config.lambda(m)),
        }
    }

    pub fn lambda(&self, mode: DecayMode) -> f64 {
        self.lambdas[mode_index(mode)]
    }

    pub fn half_life_days(&self, mode: DecayMode) -> f64 {
        formula::half_life_days(self.lambda(mode))
    }

    /// Score at `now` for an anchor given as its parts.
    pub fn score_at(
        &self,
        anchor_score: f64,
        anchor_at: DateTime<Utc>,
        mode: DecayMode,
        now: DateTime<Utc>,
    ) -> Evaluation {
        let raw_days = formula::days_between(anchor_at, now);
        let clock_skew = (raw_days < 0.0).then(|| ClockSkew {
            anchor_at,
            now,
            skew_ms: (anchor_at - now).num_milliseconds(),
        });
        let elapsed_days = raw_days.max(0.0);

        Evaluation {
            score: formula::decay(anchor_score, self.lambda(mode), elapsed_days),
            elapsed_days,
            clock_skew,
        }
    }

    pub fn evaluate(&self, anchor: &Anchor, now: DateTime<Utc>) -> Evaluation {
        self.score_at(anchor.score, anchor.anchor_at, anchor.mode, now)
    }

    /// Inverse query. Testing and forecasting only, never used for scoring.
    pub fn days_to_reach(&self, anchor_score: f64, target: f64, mode: DecayMode) -> Reach {
        formula::days_to_reach(anchor_score, target, self.lambda(mode))
    }
}

impl Default for DecayEvaluator {
    fn default() -> Self {
        Self::new(&DecayConfig::default())
    }
}

fn mode_index(mode: DecayMode) -> usize {
    match mode {
        DecayMode::Slow => 0,
        DecayMode::Medium => 1,
        DecayMode::Fast => 2,
        DecayMode::Test => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn skew_is_reported_and_elapsed_floored() {
        let eval = DecayEvaluator::default();
        let t0 = Utc::now();
        let now = t0 - Duration::seconds(90);

        let result = eval.score_at(64.0, t0, DecayMode::Fast, now);
        assert_eq!(result.score, 64.0);
        assert_eq!(result.elapsed_days, 0.0);
        let skew = result.clock_skew.expect("skew must be raised");
        assert_eq!(skew.skew_ms, 90_000);
    }

    #[test]
    fn no_skew_when_now_after_anchor() {
        let eval = DecayEvaluator::default();
        let t0 = Utc::now();
        let result = eval.score_at(64.0, t0, DecayMode::Fast, t0 + Duration::days(1));
        assert!(result.clock_skew.is_none());
        assert!(result.score < 64.0);
    }

    #[test]
    fn lambdas_follow_config() {
        let mut config = DecayConfig::default();
        config.lambda_slow = 0.5;
        let eval = DecayEvaluator::new(&config);
        assert_eq!(eval.lambda(DecayMode::Slow), 0.5);
        assert_eq!(eval.lambda(DecayMode::Medium), 0.085998);
    }
}
