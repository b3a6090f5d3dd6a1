use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Band, DecayMode};
use crate::constants::{SCORE_MAX, SCORE_MIN};

/// The persisted `(score, anchor_at, mode)` triple a contact's warmth is
/// derived from, plus the row revision used for compare-and-swap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub contact_id: String,
    /// Score at `anchor_at`, always within [0, 100].
    pub score: f64,
    pub anchor_at: DateTime<Utc>,
    pub mode: DecayMode,
    /// Incremented by every successful compare-and-swap.
    pub revision: u64,
}

impl Anchor {
    /// A fresh anchor at revision 0. The score is clamped into [0, 100].
    pub fn new(
        contact_id: impl Into<String>,
        score: f64,
        anchor_at: DateTime<Utc>,
        mode: DecayMode,
    ) -> Self {
        Self {
            contact_id: contact_id.into(),
            score: clamp_score(score),
            anchor_at,
            mode,
            revision: 0,
        }
    }

    /// The anchor that replaces `self` on the next successful write.
    pub fn successor(&self, score: f64, anchor_at: DateTime<Utc>, mode: DecayMode) -> Self {
        Self {
            contact_id: self.contact_id.clone(),
            score: clamp_score(score),
            anchor_at,
            mode,
            revision: self.revision + 1,
        }
    }

    /// Same score, instant and mode, ignoring revision.
    pub fn same_state(&self, other: &Anchor) -> bool {
        self.contact_id == other.contact_id
            && self.score == other.score
            && self.anchor_at == other.anchor_at
            && self.mode == other.mode
    }

    pub fn origin(&self) -> AnchorOrigin {
        AnchorOrigin {
            score: self.score,
            anchor_at: self.anchor_at,
            mode: self.mode,
        }
    }
}

/// The anchor a contact was created with. Immutable; used for replay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorOrigin {
    pub score: f64,
    pub anchor_at: DateTime<Utc>,
    pub mode: DecayMode,
}

/// Display-only fields cached on the contact row. Never authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplaySnapshot {
    pub band: Band,
    pub score_cached: i64,
    pub cached_at: DateTime<Utc>,
}

/// Everything stored for one contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorRecord {
    pub anchor: Anchor,
    pub origin: AnchorOrigin,
    pub display: Option<DisplaySnapshot>,
}

pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return SCORE_MIN;
    }
    score.clamp(SCORE_MIN, SCORE_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_anchor_clamps_score() {
        let now = Utc::now();
        assert_eq!(Anchor::new("c", 140.0, now, DecayMode::Medium).score, 100.0);
        assert_eq!(Anchor::new("c", -3.0, now, DecayMode::Medium).score, 0.0);
        assert_eq!(Anchor::new("c", f64::NAN, now, DecayMode::Medium).score, 0.0);
    }

    #[test]
    fn successor_bumps_revision_and_keeps_contact() {
        let now = Utc::now();
        let a = Anchor::new("c-1", 80.0, now, DecayMode::Slow);
        let b = a.successor(70.0, now, DecayMode::Fast);
        assert_eq!(b.revision, a.revision + 1);
        assert_eq!(b.contact_id, "c-1");
        assert!(!a.same_state(&b));
        assert!(b.same_state(&a.successor(70.0, now, DecayMode::Fast)));
    }
}
