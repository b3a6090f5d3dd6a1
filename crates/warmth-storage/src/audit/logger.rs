//! Journal every anchor mutation: mode switches and interaction boosts.

use rusqlite::Connection;

use warmth_core::errors::WarmthResult;
use warmth_core::models::AnchorMutation;

use crate::queries::audit_ops;

/// Append-only audit logger. Wraps the audit_ops query functions.
///
/// Callers pass the connection of an open transaction so the journal row
/// commits or rolls back together with the anchor it describes.
pub struct AuditLogger;

impl AuditLogger {
    pub fn record(conn: &Connection, mutation: &AnchorMutation) -> WarmthResult<()> {
        match mutation {
            AnchorMutation::ModeChange(entry) => audit_ops::insert_mode_change(conn, entry)?,
            AnchorMutation::Boost(entry) => audit_ops::insert_boost(conn, entry)?,
        }
        tracing::debug!(
            contact_id = mutation.contact_id(),
            revision = mutation.revision(),
            kind = mutation_kind(mutation),
            "journaled anchor mutation"
        );
        Ok(())
    }

    /// Both journals merged, ordered by revision.
    pub fn history(conn: &Connection, contact_id: &str) -> WarmthResult<Vec<AnchorMutation>> {
        let mut history: Vec<AnchorMutation> = audit_ops::mode_changes_for(conn, contact_id)?
            .into_iter()
            .map(AnchorMutation::ModeChange)
            .chain(
                audit_ops::boosts_for(conn, contact_id)?
                    .into_iter()
                    .map(AnchorMutation::Boost),
            )
            .collect();
        history.sort_by_key(AnchorMutation::revision);
        Ok(history)
    }
}

fn mutation_kind(mutation: &AnchorMutation) -> &'static str {
    match mutation {
        AnchorMutation::ModeChange(_) => "mode_change",
        AnchorMutation::Boost(_) => "boost",
    }
}
