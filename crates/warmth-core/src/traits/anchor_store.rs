use crate::errors::WarmthResult;
use crate::models::{Anchor, AnchorMutation, AnchorRecord, BoostLogEntry, DisplaySnapshot, ModeChangeLogEntry};

/// Result of a compare-and-swap attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasOutcome {
    /// The row matched `expected` and now holds the new anchor.
    Swapped,
    /// The row changed since it was read. Nothing was written.
    Conflict,
}

/// Per-contact anchor persistence.
///
/// Every write after creation goes through [`IAnchorStore::compare_and_swap`],
/// which must persist the new anchor, its display snapshot and the audit
/// record atomically, or none of them.
pub trait IAnchorStore: Send + Sync {
    // --- Lifecycle ---
    fn create(&self, anchor: &Anchor, display: &DisplaySnapshot) -> WarmthResult<()>;
    /// Removes the anchor and its audit trail. Returns false if absent.
    fn delete(&self, contact_id: &str) -> WarmthResult<bool>;

    // --- Reads ---
    fn get(&self, contact_id: &str) -> WarmthResult<Option<Anchor>>;
    fn get_record(&self, contact_id: &str) -> WarmthResult<Option<AnchorRecord>>;
    fn list(&self) -> WarmthResult<Vec<Anchor>>;

    // --- Writes ---
    fn compare_and_swap(
        &self,
        expected: &Anchor,
        new: &Anchor,
        display: &DisplaySnapshot,
        mutation: &AnchorMutation,
    ) -> WarmthResult<CasOutcome>;

    // --- Audit trail ---
    fn mode_changes(&self, contact_id: &str) -> WarmthResult<Vec<ModeChangeLogEntry>>;
    fn boosts(&self, contact_id: &str) -> WarmthResult<Vec<BoostLogEntry>>;
    /// Both journals merged, ordered by revision.
    fn history(&self, contact_id: &str) -> WarmthResult<Vec<AnchorMutation>>;
}
