use chrono::{DateTime, Utc};

use warmth_core::models::{Anchor, DisplaySnapshot};
use warmth_decay::{BandClassifier, DecayEvaluator, Evaluation};

/// Display cache for a freshly written anchor.
pub(crate) fn snapshot(classifier: &BandClassifier, score: f64, at: DateTime<Utc>) -> DisplaySnapshot {
    DisplaySnapshot {
        band: classifier.classify(score),
        score_cached: score.round() as i64,
        cached_at: at,
    }
}

/// Evaluate and log clock skew. Skew never fails the caller.
pub(crate) fn evaluate(evaluator: &DecayEvaluator, anchor: &Anchor, now: DateTime<Utc>) -> Evaluation {
    let evaluation = evaluator.evaluate(anchor, now);
    if let Some(skew) = evaluation.clock_skew {
        tracing::warn!(
            contact_id = %anchor.contact_id,
            skew_ms = skew.skew_ms,
            anchor_at = %skew.anchor_at,
            now = %skew.now,
            "clock behind anchor; elapsed time floored at zero"
        );
    }
    evaluation
}
