//! Append-only audit journal for anchor mutations.

pub mod logger;

pub use logger::AuditLogger;
