use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::Band;

/// One row of the band table: scores `>= min_score` fall into `band`
/// unless an earlier row already matched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandThreshold {
    pub band: Band,
    pub min_score: f64,
}

/// The canonical band table. Every consumer (classifier, API, help
/// content) reads thresholds from here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandConfig {
    pub thresholds: Vec<BandThreshold>,
}

impl Default for BandConfig {
    fn default() -> Self {
        Self {
            thresholds: defaults::DEFAULT_BAND_THRESHOLDS
                .iter()
                .map(|&(band, min_score)| BandThreshold { band, min_score })
                .collect(),
        }
    }
}
