//! # warmth-scoring
//!
//! The mutating side of the warmth subsystem. Every write is a
//! read → compute → compare-and-swap cycle against an [`IAnchorStore`],
//! retried a bounded number of times.
//!
//! [`IAnchorStore`]: warmth_core::traits::IAnchorStore

pub mod booster;
pub mod consistency;
mod display;
pub mod mode_switch;
pub mod retry;
pub mod service;

pub use booster::{BoostOutcome, InteractionBooster};
pub use consistency::{ConsistencyChecker, ConsistencyReport, Violation};
pub use mode_switch::{ModeSwitchCoordinator, ModeSwitchResult};
pub use retry::{CasRetry, Step};
pub use service::{
    BandCount, Forecast, ModeInfo, ModeListing, ModeReading, ScoringService, WarmthReading,
    WarmthSummary,
};
