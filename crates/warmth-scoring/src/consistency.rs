//! Replay a contact's origin anchor through its journal and compare the
//! result with the stored anchor.
//!
//! Any anchor change that was not journaled, or journaled inconsistently,
//! shows up as a [`Violation`].

use chrono::{DateTime, Utc};
use serde::Serialize;

use warmth_core::constants::{CONTINUITY_DISPLAY_TOLERANCE, CONTINUITY_EPSILON, SCORE_MAX};
use warmth_core::models::{AnchorMutation, AnchorRecord, DecayMode};
use warmth_decay::DecayEvaluator;

/// Absolute tolerance between a journaled `score_before` and the decay of
/// the previous state at that instant.
const CHAIN_TOLERANCE: f64 = CONTINUITY_EPSILON * SCORE_MAX;

/// Tolerance between the replayed and the stored anchor score.
const FINAL_SCORE_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// Journal revisions are not the sequence 1, 2, 3, ...
    RevisionGap { expected: u64, found: u64 },
    /// A mode change whose before and after scores differ.
    ContinuityBreach {
        revision: u64,
        score_before: f64,
        score_after: f64,
    },
    /// A boost that lowered the score.
    BoostDecreased {
        revision: u64,
        score_before: f64,
        score_after: f64,
    },
    /// `score_before` does not follow from the previous state.
    ChainBreak {
        revision: u64,
        expected_score: f64,
        logged_score: f64,
    },
    /// A mode change whose `from_mode` is not the mode in effect.
    ModeChainBreak {
        revision: u64,
        expected_mode: DecayMode,
        logged_mode: DecayMode,
    },
    /// An entry re-anchors earlier than the previous anchor.
    AnchorRegressed {
        revision: u64,
        previous: DateTime<Utc>,
        logged: DateTime<Utc>,
    },
    /// Replaying the journal does not reproduce the stored anchor.
    AnchorMismatch {
        field: &'static str,
        replayed: String,
        stored: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsistencyReport {
    pub contact_id: String,
    pub entries_checked: usize,
    pub stored_revision: u64,
    pub consistent: bool,
    pub violations: Vec<Violation>,
}

/// State carried through the replay.
struct Replayed {
    score: f64,
    anchor_at: DateTime<Utc>,
    mode: DecayMode,
    revision: u64,
}

#[derive(Debug, Clone, Default)]
pub struct ConsistencyChecker {
    evaluator: DecayEvaluator,
}

impl ConsistencyChecker {
    pub fn new(evaluator: DecayEvaluator) -> Self {
        Self { evaluator }
    }

    /// `history` must be ordered by revision.
    pub fn check(&self, record: &AnchorRecord, history: &[AnchorMutation]) -> ConsistencyReport {
        let mut violations = Vec::new();
        let mut state = Replayed {
            score: record.origin.score,
            anchor_at: record.origin.anchor_at,
            mode: record.origin.mode,
            revision: 0,
        };

        for entry in history {
            let revision = entry.revision();
            if revision != state.revision + 1 {
                violations.push(Violation::RevisionGap {
                    expected: state.revision + 1,
                    found: revision,
                });
            }

            let at = entry.anchor_at();
            if at < state.anchor_at {
                violations.push(Violation::AnchorRegressed {
                    revision,
                    previous: state.anchor_at,
                    logged: at,
                });
            }

            let expected = self
                .evaluator
                .score_at(state.score, state.anchor_at, state.mode, at)
                .score;
            if (expected - entry.score_before()).abs() > CHAIN_TOLERANCE {
                violations.push(Violation::ChainBreak {
                    revision,
                    expected_score: expected,
                    logged_score: entry.score_before(),
                });
            }

            match entry {
                AnchorMutation::ModeChange(change) => {
                    if change.from_mode != state.mode {
                        violations.push(Violation::ModeChainBreak {
                            revision,
                            expected_mode: state.mode,
                            logged_mode: change.from_mode,
                        });
                    }
                    if (change.score_after - change.score_before).abs()
                        > CONTINUITY_DISPLAY_TOLERANCE
                    {
                        violations.push(Violation::ContinuityBreach {
                            revision,
                            score_before: change.score_before,
                            score_after: change.score_after,
                        });
                    }
                    state.mode = change.to_mode;
                }
                AnchorMutation::Boost(boost) => {
                    if boost.score_after < boost.score_before {
                        violations.push(Violation::BoostDecreased {
                            revision,
                            score_before: boost.score_before,
                            score_after: boost.score_after,
                        });
                    }
                }
            }

            state.score = entry.score_after();
            state.anchor_at = at;
            state.revision = revision;
        }

        let stored = &record.anchor;
        if stored.revision != state.revision {
            violations.push(mismatch("revision", state.revision, stored.revision));
        }
        if (stored.score - state.score).abs() > FINAL_SCORE_TOLERANCE {
            violations.push(mismatch("score", state.score, stored.score));
        }
        if stored.anchor_at != state.anchor_at {
            violations.push(mismatch("anchor_at", state.anchor_at, stored.anchor_at));
        }
        if stored.mode != state.mode {
            violations.push(mismatch("mode", state.mode, stored.mode));
        }

        if !violations.is_empty() {
            tracing::warn!(
                contact_id = %stored.contact_id,
                violations = violations.len(),
                "warmth anchor failed consistency check"
            );
        }

        ConsistencyReport {
            contact_id: stored.contact_id.clone(),
            entries_checked: history.len(),
            stored_revision: stored.revision,
            consistent: violations.is_empty(),
            violations,
        }
    }
}

fn mismatch(field: &'static str, replayed: impl ToString, stored: impl ToString) -> Violation {
    Violation::AnchorMismatch {
        field,
        replayed: replayed.to_string(),
        stored: stored.to_string(),
    }
}
