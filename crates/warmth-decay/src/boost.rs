use warmth_core::config::BoostConfig;
use warmth_core::constants::SCORE_MAX;
use warmth_core::models::InteractionEvent;

/// `sBoosted = min(100, sNow + impulse(channel))`.
#[derive(Debug, Clone)]
pub struct BoostFunction {
    config: BoostConfig,
}

impl BoostFunction {
    pub fn new(config: &BoostConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub fn impulse(&self, event: &InteractionEvent) -> f64 {
        self.config.impulse(event.channel).max(0.0)
    }

    /// Never returns less than `score_now`.
    pub fn apply(&self, score_now: f64, event: &InteractionEvent) -> f64 {
        (score_now + self.impulse(event)).min(SCORE_MAX).max(score_now)
    }
}

impl Default for BoostFunction {
    fn default() -> Self {
        Self::new(&BoostConfig::default())
    }
}
