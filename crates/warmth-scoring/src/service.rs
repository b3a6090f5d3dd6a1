//! `ScoringService`: the boundary the HTTP layer and the interaction
//! pipeline talk to. Reads are evaluated lazily from the stored anchor;
//! writes go through the coordinator and the booster.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use warmth_core::clock::Clock;
use warmth_core::config::{BandThreshold, DecayConfig, WarmthConfig};
use warmth_core::constants::{MS_PER_DAY, SCORE_MAX, SCORE_MIN};
use warmth_core::errors::{WarmthError, WarmthResult};
use warmth_core::models::{Anchor, Band, DecayMode, InteractionEvent, ModeChangeLogEntry};
use warmth_core::traits::IAnchorStore;
use warmth_decay::{BandClassifier, BoostFunction, DecayEvaluator, Reach};

use crate::booster::{BoostOutcome, InteractionBooster};
use crate::consistency::{ConsistencyChecker, ConsistencyReport};
use crate::display;
use crate::mode_switch::{ensure_selectable, ModeSwitchCoordinator, ModeSwitchResult};
use crate::retry::CasRetry;

/// Current warmth of one contact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WarmthReading {
    pub contact_id: String,
    pub score: f64,
    pub band: Band,
    pub mode: DecayMode,
    pub anchor_at: DateTime<Utc>,
    pub evaluated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeReading {
    pub contact_id: String,
    pub current_mode: DecayMode,
    pub current_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeInfo {
    pub mode: DecayMode,
    pub lambda_per_day: f64,
    pub half_life_days: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeListing {
    pub default_mode: DecayMode,
    pub modes: Vec<ModeInfo>,
}

/// When a contact's score will drop to `target` if nothing happens.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    pub contact_id: String,
    pub mode: DecayMode,
    pub current_score: f64,
    pub target: f64,
    /// `null` when the target is never reached.
    pub days: Reach,
    pub reaches_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandCount {
    pub band: Band,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WarmthSummary {
    pub total: usize,
    pub average_score: Option<f64>,
    pub bands: Vec<BandCount>,
    pub evaluated_at: DateTime<Utc>,
}

pub struct ScoringService {
    store: Arc<dyn IAnchorStore>,
    clock: Arc<dyn Clock>,
    decay: DecayConfig,
    evaluator: DecayEvaluator,
    classifier: BandClassifier,
    coordinator: ModeSwitchCoordinator,
    booster: InteractionBooster,
    checker: ConsistencyChecker,
}

impl ScoringService {
    pub fn new(store: Arc<dyn IAnchorStore>, clock: Arc<dyn Clock>, config: &WarmthConfig) -> Self {
        let evaluator = DecayEvaluator::new(&config.decay);
        let classifier = BandClassifier::new(&config.bands);
        let retry = CasRetry::from_config(&config.concurrency);

        let coordinator = ModeSwitchCoordinator::new(
            Arc::clone(&store),
            Arc::clone(&clock),
            evaluator.clone(),
            classifier.clone(),
            retry,
            config.decay.allow_test_mode,
        );
        let booster = InteractionBooster::new(
            Arc::clone(&store),
            Arc::clone(&clock),
            evaluator.clone(),
            classifier.clone(),
            BoostFunction::new(&config.boost),
            retry,
            config.boost.max_future_skew_secs,
        );

        Self {
            store,
            clock,
            decay: config.decay.clone(),
            checker: ConsistencyChecker::new(evaluator.clone()),
            evaluator,
            classifier,
            coordinator,
            booster,
        }
    }

    // --- Lifecycle ---

    /// Create the anchor for a new contact: full score and the default mode
    /// unless overridden.
    pub fn create_anchor(
        &self,
        contact_id: &str,
        mode: Option<DecayMode>,
        score: Option<f64>,
    ) -> WarmthResult<WarmthReading> {
        let contact_id = validate_contact_id(contact_id)?;
        let mode = mode.unwrap_or(self.decay.default_mode);
        ensure_selectable(mode, self.decay.allow_test_mode)?;
        let score = score.unwrap_or(self.decay.initial_score);
        if !score.is_finite() || !(SCORE_MIN..=SCORE_MAX).contains(&score) {
            return Err(WarmthError::validation(
                "score",
                format!("must be within [{SCORE_MIN}, {SCORE_MAX}], got {score}"),
            ));
        }

        let now = self.clock.now();
        let anchor = Anchor::new(contact_id, score, now, mode);
        self.store
            .create(&anchor, &display::snapshot(&self.classifier, anchor.score, now))?;
        tracing::info!(contact_id, mode = %mode, score, "created warmth anchor");
        Ok(self.reading(&anchor, now))
    }

    /// Remove the anchor together with its audit trail.
    pub fn delete_anchor(&self, contact_id: &str) -> WarmthResult<()> {
        if !self.store.delete(contact_id)? {
            return Err(WarmthError::not_found(contact_id));
        }
        tracing::info!(contact_id, "deleted warmth anchor and journal");
        Ok(())
    }

    // --- Reads ---

    pub fn read(&self, contact_id: &str) -> WarmthResult<WarmthReading> {
        let anchor = self.anchor(contact_id)?;
        Ok(self.reading(&anchor, self.clock.now()))
    }

    pub fn current_mode(&self, contact_id: &str) -> WarmthResult<ModeReading> {
        let reading = self.read(contact_id)?;
        Ok(ModeReading {
            contact_id: reading.contact_id,
            current_mode: reading.mode,
            current_score: reading.score,
        })
    }

    /// Mode-change journal, oldest first.
    pub fn mode_changes(&self, contact_id: &str) -> WarmthResult<Vec<ModeChangeLogEntry>> {
        self.anchor(contact_id)?;
        self.store.mode_changes(contact_id)
    }

    pub fn consistency(&self, contact_id: &str) -> WarmthResult<ConsistencyReport> {
        let record = self
            .store
            .get_record(contact_id)?
            .ok_or_else(|| WarmthError::not_found(contact_id))?;
        let history = self.store.history(contact_id)?;
        Ok(self.checker.check(&record, &history))
    }

    pub fn forecast(&self, contact_id: &str, target: f64) -> WarmthResult<Forecast> {
        if !target.is_finite() || !(SCORE_MIN..=SCORE_MAX).contains(&target) {
            return Err(WarmthError::validation(
                "target",
                format!("must be within [{SCORE_MIN}, {SCORE_MAX}], got {target}"),
            ));
        }
        let anchor = self.anchor(contact_id)?;
        let now = self.clock.now();
        let current_score = display::evaluate(&self.evaluator, &anchor, now).score;
        let days = self.evaluator.days_to_reach(current_score, target, anchor.mode);

        Ok(Forecast {
            contact_id: anchor.contact_id,
            mode: anchor.mode,
            current_score,
            target,
            reaches_at: days.days().and_then(|d| add_days(now, d)),
            days,
        })
    }

    pub fn summary(&self) -> WarmthResult<WarmthSummary> {
        let now = self.clock.now();
        let anchors = self.store.list()?;

        let mut bands: Vec<BandCount> = self
            .classifier
            .thresholds()
            .iter()
            .map(|t| BandCount { band: t.band, count: 0 })
            .collect();
        let mut total_score = 0.0;
        for anchor in &anchors {
            let score = display::evaluate(&self.evaluator, anchor, now).score;
            total_score += score;
            let band = self.classifier.classify(score);
            if let Some(slot) = bands.iter_mut().find(|b| b.band == band) {
                slot.count += 1;
            }
        }

        Ok(WarmthSummary {
            total: anchors.len(),
            average_score: (!anchors.is_empty()).then(|| total_score / anchors.len() as f64),
            bands,
            evaluated_at: now,
        })
    }

    /// Selectable modes under the current configuration.
    pub fn modes(&self) -> ModeListing {
        ModeListing {
            default_mode: self.decay.default_mode,
            modes: self
                .decay
                .selectable_modes()
                .into_iter()
                .map(|mode| ModeInfo {
                    mode,
                    lambda_per_day: self.evaluator.lambda(mode),
                    half_life_days: self.evaluator.half_life_days(mode),
                })
                .collect(),
        }
    }

    /// The canonical band table.
    pub fn bands(&self) -> &[BandThreshold] {
        self.classifier.thresholds()
    }

    // --- Writes ---

    pub fn switch_mode(&self, contact_id: &str, mode: DecayMode) -> WarmthResult<ModeSwitchResult> {
        self.coordinator.switch_mode(contact_id, mode)
    }

    /// Interaction hook, called after the interaction row commits.
    pub fn on_interaction(&self, event: &InteractionEvent) -> WarmthResult<BoostOutcome> {
        self.booster.on_interaction(event)
    }

    fn anchor(&self, contact_id: &str) -> WarmthResult<Anchor> {
        self.store
            .get(contact_id)?
            .ok_or_else(|| WarmthError::not_found(contact_id))
    }

    fn reading(&self, anchor: &Anchor, now: DateTime<Utc>) -> WarmthReading {
        let score = display::evaluate(&self.evaluator, anchor, now).score;
        WarmthReading {
            contact_id: anchor.contact_id.clone(),
            score,
            band: self.classifier.classify(score),
            mode: anchor.mode,
            anchor_at: anchor.anchor_at,
            evaluated_at: now,
        }
    }
}

fn validate_contact_id(contact_id: &str) -> WarmthResult<&str> {
    let trimmed = contact_id.trim();
    if trimmed.is_empty() {
        return Err(WarmthError::validation("contact_id", "must not be empty"));
    }
    Ok(trimmed)
}

fn add_days(from: DateTime<Utc>, days: f64) -> Option<DateTime<Utc>> {
    let ms = (days * MS_PER_DAY).round();
    if !ms.is_finite() || ms >= i64::MAX as f64 {
        return None;
    }
    from.checked_add_signed(TimeDelta::try_milliseconds(ms as i64)?)
}
