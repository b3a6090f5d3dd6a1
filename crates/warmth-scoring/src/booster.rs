//! Re-anchoring on a new interaction.

use std::sync::Arc;

use chrono::Duration;
use serde::Serialize;

use warmth_core::clock::{truncate_to_millis, Clock};
use warmth_core::errors::{WarmthError, WarmthResult};
use warmth_core::models::{Anchor, AnchorMutation, BoostLogEntry, InteractionEvent};
use warmth_core::traits::IAnchorStore;
use warmth_decay::{BandClassifier, BoostFunction, DecayEvaluator};

use crate::display;
use crate::retry::{CasRetry, Step};

// Keeps `now + skew` representable.
const MAX_SKEW_SECS: i64 = 100 * 365 * 86_400;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoostOutcome {
    /// False when the interaction predates the anchor and was ignored.
    pub applied: bool,
    pub score_before: f64,
    pub score_after: f64,
    /// The anchor in effect after the call.
    pub anchor: Anchor,
}

pub struct InteractionBooster {
    store: Arc<dyn IAnchorStore>,
    clock: Arc<dyn Clock>,
    evaluator: DecayEvaluator,
    classifier: BandClassifier,
    boost: BoostFunction,
    retry: CasRetry,
    max_future_skew: Duration,
}

impl InteractionBooster {
    pub fn new(
        store: Arc<dyn IAnchorStore>,
        clock: Arc<dyn Clock>,
        evaluator: DecayEvaluator,
        classifier: BandClassifier,
        boost: BoostFunction,
        retry: CasRetry,
        max_future_skew_secs: u64,
    ) -> Self {
        Self {
            store,
            clock,
            evaluator,
            classifier,
            boost,
            retry,
            max_future_skew: Duration::seconds(
                i64::try_from(max_future_skew_secs)
                    .unwrap_or(i64::MAX)
                    .min(MAX_SKEW_SECS),
            ),
        }
    }

    /// Boost the contact's anchor for `event`.
    ///
    /// Interactions older than the current anchor instant leave the anchor
    /// untouched. The mode is never changed here.
    pub fn on_interaction(&self, event: &InteractionEvent) -> WarmthResult<BoostOutcome> {
        let occurred_at = truncate_to_millis(event.occurred_at);
        let now = self.clock.now();
        let too_late = now
            .checked_add_signed(self.max_future_skew)
            .is_some_and(|limit| occurred_at > limit);
        if too_late {
            return Err(WarmthError::validation(
                "occurred_at",
                format!("interaction at {occurred_at} is too far in the future (now {now})"),
            ));
        }

        let contact_id = event.contact_id.as_str();
        let outcome = self.retry.run(self.store.as_ref(), contact_id, |current| {
            if occurred_at < current.anchor_at {
                let score = display::evaluate(&self.evaluator, current, self.clock.now()).score;
                return Ok(Step::Done(BoostOutcome {
                    applied: false,
                    score_before: score,
                    score_after: score,
                    anchor: current.clone(),
                }));
            }

            let score_then = self.evaluator.evaluate(current, occurred_at).score;
            let boosted = self.boost.apply(score_then, event);
            let next = current.successor(boosted, occurred_at, current.mode);

            let mutation = AnchorMutation::Boost(BoostLogEntry {
                contact_id: current.contact_id.clone(),
                channel: event.channel,
                direction: event.direction,
                occurred_at,
                score_before: score_then,
                score_after: next.score,
                revision: next.revision,
                created_at: self.clock.now(),
            });
            Ok(Step::Swap {
                display: display::snapshot(&self.classifier, next.score, occurred_at),
                value: BoostOutcome {
                    applied: true,
                    score_before: score_then,
                    score_after: next.score,
                    anchor: next.clone(),
                },
                anchor: next,
                mutation,
            })
        })?;

        if outcome.applied {
            tracing::info!(
                contact_id,
                channel = %event.channel,
                score_before = outcome.score_before,
                score_after = outcome.score_after,
                "applied interaction boost"
            );
        } else {
            tracing::debug!(
                contact_id,
                occurred_at = %occurred_at,
                anchor_at = %outcome.anchor.anchor_at,
                "interaction predates anchor; ignored for scoring"
            );
        }
        Ok(outcome)
    }
}
