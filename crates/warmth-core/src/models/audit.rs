use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Channel, DecayMode, Direction};

/// One row of `warmth_mode_changes`. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeChangeLogEntry {
    pub contact_id: String,
    pub from_mode: DecayMode,
    pub to_mode: DecayMode,
    pub score_before: f64,
    pub score_after: f64,
    /// The switch instant, which is also the new anchor instant.
    pub created_at: DateTime<Utc>,
    /// Anchor revision this switch produced.
    pub revision: u64,
}

/// One row of `warmth_boosts`. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoostLogEntry {
    pub contact_id: String,
    pub channel: Channel,
    pub direction: Direction,
    /// Interaction instant, which is also the new anchor instant.
    pub occurred_at: DateTime<Utc>,
    pub score_before: f64,
    pub score_after: f64,
    pub revision: u64,
    pub created_at: DateTime<Utc>,
}

/// The audit record written in the same transaction as an anchor swap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnchorMutation {
    ModeChange(ModeChangeLogEntry),
    Boost(BoostLogEntry),
}

impl AnchorMutation {
    pub fn revision(&self) -> u64 {
        match self {
            Self::ModeChange(e) => e.revision,
            Self::Boost(e) => e.revision,
        }
    }

    pub fn contact_id(&self) -> &str {
        match self {
            Self::ModeChange(e) => &e.contact_id,
            Self::Boost(e) => &e.contact_id,
        }
    }

    /// Instant the resulting anchor is set to.
    pub fn anchor_at(&self) -> DateTime<Utc> {
        match self {
            Self::ModeChange(e) => e.created_at,
            Self::Boost(e) => e.occurred_at,
        }
    }

    pub fn score_before(&self) -> f64 {
        match self {
            Self::ModeChange(e) => e.score_before,
            Self::Boost(e) => e.score_before,
        }
    }

    pub fn score_after(&self) -> f64 {
        match self {
            Self::ModeChange(e) => e.score_after,
            Self::Boost(e) => e.score_after,
        }
    }
}
