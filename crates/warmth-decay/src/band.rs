use warmth_core::config::{BandConfig, BandThreshold};
use warmth_core::models::Band;

/// Score → band using the single configured threshold table,
/// evaluated top-down (first match wins).
#[derive(Debug, Clone)]
pub struct BandClassifier {
    thresholds: Vec<BandThreshold>,
}

impl BandClassifier {
    pub fn new(config: &BandConfig) -> Self {
        Self {
            thresholds: config.thresholds.clone(),
        }
    }

    pub fn classify(&self, score: f64) -> Band {
        self.thresholds
            .iter()
            .find(|t| score >= t.min_score)
            .or(self.thresholds.last())
            .map(|t| t.band)
            .unwrap_or(Band::Cold)
    }

    /// The table this classifier uses, for help and explanation content.
    pub fn thresholds(&self) -> &[BandThreshold] {
        &self.thresholds
    }
}

impl Default for BandClassifier {
    fn default() -> Self {
        Self::new(&BandConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_boundaries() {
        let c = BandClassifier::default();
        assert_eq!(c.classify(100.0), Band::Hot);
        assert_eq!(c.classify(75.0), Band::Hot);
        assert_eq!(c.classify(74.999), Band::Warm);
        assert_eq!(c.classify(50.0), Band::Warm);
        assert_eq!(c.classify(49.99), Band::Cool);
        assert_eq!(c.classify(25.0), Band::Cool);
        assert_eq!(c.classify(24.9), Band::Cold);
        assert_eq!(c.classify(0.0), Band::Cold);
    }

    #[test]
    fn out_of_range_and_nan_fall_to_last_band() {
        let c = BandClassifier::default();
        assert_eq!(c.classify(-1.0), Band::Cold);
        assert_eq!(c.classify(f64::NAN), Band::Cold);
    }

    #[test]
    fn custom_table_is_respected() {
        let config = BandConfig {
            thresholds: vec![
                BandThreshold { band: Band::Hot, min_score: 80.0 },
                BandThreshold { band: Band::Warm, min_score: 60.0 },
                BandThreshold { band: Band::Cool, min_score: 20.0 },
                BandThreshold { band: Band::Cold, min_score: 0.0 },
            ],
        };
        let c = BandClassifier::new(&config);
        assert_eq!(c.classify(79.0), Band::Warm);
        assert_eq!(c.classify(59.0), Band::Cool);
        assert_eq!(c.thresholds().len(), 4);
    }
}
