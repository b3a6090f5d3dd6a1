//! # warmth-decay
//!
//! Pure scoring math. Nothing here reads a clock or touches storage:
//! callers pass the anchor and the instant to evaluate at.

pub mod band;
pub mod boost;
pub mod evaluator;
pub mod formula;

pub use band::BandClassifier;
pub use boost::BoostFunction;
pub use evaluator::{ClockSkew, DecayEvaluator, Evaluation};
pub use formula::Reach;
