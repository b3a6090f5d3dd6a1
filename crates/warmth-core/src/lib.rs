//! # warmth-core
//!
//! Foundation crate for the warmth scoring subsystem.
//! Defines the anchor model, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod clock;
pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::WarmthConfig;
pub use errors::{WarmthError, WarmthResult};
pub use models::{
    Anchor, AnchorMutation, AnchorOrigin, AnchorRecord, Band, BoostLogEntry, Channel,
    DecayMode, Direction, DisplaySnapshot, InteractionEvent, ModeChangeLogEntry,
};
