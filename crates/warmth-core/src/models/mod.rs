pub mod anchor;
pub mod audit;
pub mod band;
pub mod interaction;
pub mod mode;

pub use anchor::{Anchor, AnchorOrigin, AnchorRecord, DisplaySnapshot};
pub use audit::{AnchorMutation, BoostLogEntry, ModeChangeLogEntry};
pub use band::Band;
pub use interaction::{Channel, Direction, InteractionEvent};
pub use mode::DecayMode;
