pub mod anchor_store;

pub use anchor_store::{CasOutcome, IAnchorStore};
