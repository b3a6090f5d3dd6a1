//! Re-anchoring on a decay-mode change.
//!
//! The new anchor is the current score at the switch instant under the new
//! mode, so the curve is continuous at that instant and only its slope
//! changes.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use warmth_core::clock::Clock;
use warmth_core::errors::{WarmthError, WarmthResult};
use warmth_core::models::{AnchorMutation, DecayMode, ModeChangeLogEntry};
use warmth_core::traits::IAnchorStore;
use warmth_decay::{BandClassifier, DecayEvaluator};

use crate::display;
use crate::retry::{CasRetry, Step};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeSwitchResult {
    pub contact_id: String,
    pub mode_before: DecayMode,
    pub mode_after: DecayMode,
    pub score_before: f64,
    pub score_after: f64,
    pub switched_at: DateTime<Utc>,
}

pub struct ModeSwitchCoordinator {
    store: Arc<dyn IAnchorStore>,
    clock: Arc<dyn Clock>,
    evaluator: DecayEvaluator,
    classifier: BandClassifier,
    retry: CasRetry,
    allow_test_mode: bool,
}

impl ModeSwitchCoordinator {
    pub fn new(
        store: Arc<dyn IAnchorStore>,
        clock: Arc<dyn Clock>,
        evaluator: DecayEvaluator,
        classifier: BandClassifier,
        retry: CasRetry,
        allow_test_mode: bool,
    ) -> Self {
        Self {
            store,
            clock,
            evaluator,
            classifier,
            retry,
            allow_test_mode,
        }
    }

    /// Switch `contact_id` to `new_mode`.
    ///
    /// Switching to the mode already in effect still re-anchors and is
    /// journaled with `from_mode == to_mode`.
    pub fn switch_mode(&self, contact_id: &str, new_mode: DecayMode) -> WarmthResult<ModeSwitchResult> {
        ensure_selectable(new_mode, self.allow_test_mode)?;

        let result = self.retry.run(self.store.as_ref(), contact_id, |current| {
            let now = self.clock.now();
            let score_now = display::evaluate(&self.evaluator, current, now).score;
            // Never move the anchor backwards, even if the clock is behind.
            let at = now.max(current.anchor_at);
            let next = current.successor(score_now, at, new_mode);

            let mutation = AnchorMutation::ModeChange(ModeChangeLogEntry {
                contact_id: current.contact_id.clone(),
                from_mode: current.mode,
                to_mode: new_mode,
                score_before: score_now,
                score_after: next.score,
                created_at: at,
                revision: next.revision,
            });
            let value = ModeSwitchResult {
                contact_id: current.contact_id.clone(),
                mode_before: current.mode,
                mode_after: new_mode,
                score_before: score_now,
                score_after: next.score,
                switched_at: at,
            };
            Ok(Step::Swap {
                display: display::snapshot(&self.classifier, next.score, at),
                anchor: next,
                mutation,
                value,
            })
        })?;

        tracing::info!(
            contact_id,
            mode_before = %result.mode_before,
            mode_after = %result.mode_after,
            score = result.score_after,
            "switched decay mode"
        );
        Ok(result)
    }
}

/// `test` is only accepted when the deployment enables it.
pub(crate) fn ensure_selectable(mode: DecayMode, allow_test_mode: bool) -> WarmthResult<()> {
    if mode.is_user_selectable() || allow_test_mode {
        Ok(())
    } else {
        Err(WarmthError::validation(
            "mode",
            format!("mode '{mode}' is not selectable"),
        ))
    }
}
