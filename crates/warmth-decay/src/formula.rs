use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use warmth_core::constants::{DECAY_FLOOR, MS_PER_DAY, SCORE_MAX, SCORE_MIN};

/// Exponential decay toward the floor:
///
/// ```text
/// score = WMIN + (anchorScore − WMIN) · e^(−λ · Δt_days)
/// ```
///
/// Negative `days` are treated as zero. Result is clamped to [0, 100].
pub fn decay(anchor_score: f64, lambda: f64, days: f64) -> f64 {
    let days = days.max(0.0);
    let score = DECAY_FLOOR + (anchor_score - DECAY_FLOOR) * (-lambda * days).exp();
    score.clamp(SCORE_MIN, SCORE_MAX)
}

/// Signed days between `from` and `to` at millisecond resolution.
pub fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / MS_PER_DAY
}

/// Half-life in days for a decay rate: `ln(2) / λ`.
pub fn half_life_days(lambda: f64) -> f64 {
    std::f64::consts::LN_2 / lambda
}

/// Outcome of an inverse-decay query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reach {
    /// The target is hit after this many days.
    Days(f64),
    /// The curve only approaches the target asymptotically.
    Unreachable,
}

impl Reach {
    pub fn days(self) -> Option<f64> {
        match self {
            Self::Days(d) => Some(d),
            Self::Unreachable => None,
        }
    }
}

// Serialised as a number of days, or null when unreachable.
impl Serialize for Reach {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.days().serialize(serializer)
    }
}

/// Days until a score starting at `anchor_score` decays to `target`:
/// `ln(anchor / target) / λ`.
///
/// A target at or above the anchor is already reached (0 days). A target at
/// or below the floor, or a non-positive anchor, is [`Reach::Unreachable`].
pub fn days_to_reach(anchor_score: f64, target: f64, lambda: f64) -> Reach {
    if target <= DECAY_FLOOR || anchor_score <= DECAY_FLOOR {
        return Reach::Unreachable;
    }
    if target >= anchor_score {
        return Reach::Days(0.0);
    }
    Reach::Days(((anchor_score - DECAY_FLOOR) / (target - DECAY_FLOOR)).ln() / lambda)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_elapsed_returns_anchor_exactly() {
        for score in [0.0, 0.1, 33.333_333_333, 75.0, 100.0] {
            assert_eq!(decay(score, 0.085998, 0.0), score);
        }
    }

    #[test]
    fn negative_elapsed_never_grows() {
        assert_eq!(decay(60.0, 0.171996, -5.0), 60.0);
    }

    #[test]
    fn inverse_matches_forward() {
        let lambda = 0.085998;
        let days = days_to_reach(80.0, 20.0, lambda).days().unwrap();
        assert!((decay(80.0, lambda, days) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn inverse_edge_cases() {
        assert_eq!(days_to_reach(50.0, 0.0, 0.04), Reach::Unreachable);
        assert_eq!(days_to_reach(50.0, -1.0, 0.04), Reach::Unreachable);
        assert_eq!(days_to_reach(0.0, 10.0, 0.04), Reach::Unreachable);
        assert_eq!(days_to_reach(50.0, 50.0, 0.04), Reach::Days(0.0));
        assert_eq!(days_to_reach(50.0, 90.0, 0.04), Reach::Days(0.0));
    }

    #[test]
    fn days_between_is_signed() {
        let t0 = DateTime::from_timestamp_millis(1_000_000_000_000).unwrap();
        let t1 = t0 + chrono::Duration::hours(36);
        assert!((days_between(t0, t1) - 1.5).abs() < 1e-12);
        assert!((days_between(t1, t0) + 1.5).abs() < 1e-12);
    }
}
