//! Bounded optimistic-concurrency loop around `compare_and_swap`.

use std::time::Duration;

use warmth_core::config::ConcurrencyConfig;
use warmth_core::errors::{StorageError, WarmthError, WarmthResult};
use warmth_core::models::{Anchor, AnchorMutation, DisplaySnapshot};
use warmth_core::traits::{CasOutcome, IAnchorStore};

/// What a planning step wants done with the anchor it was shown.
#[derive(Debug)]
pub enum Step<T> {
    /// Nothing to write.
    Done(T),
    /// Replace the anchor and journal `mutation`; yield `value` once stored.
    Swap {
        anchor: Anchor,
        display: DisplaySnapshot,
        mutation: AnchorMutation,
        value: T,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct CasRetry {
    max_attempts: u32,
    backoff_base_ms: u64,
}

impl CasRetry {
    pub fn new(max_attempts: u32, backoff_base_ms: u64) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff_base_ms,
        }
    }

    pub fn from_config(config: &ConcurrencyConfig) -> Self {
        Self::new(config.max_cas_attempts, config.backoff_base_ms)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay after a failed `attempt` (1-based): `base · 2^(attempt−1)`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt.saturating_sub(1));
        Duration::from_millis(self.backoff_base_ms.saturating_mul(factor))
    }

    /// Read the contact's anchor, ask `plan` what to do with it, and try to
    /// swap. On conflict the anchor is re-read and `plan` runs again.
    ///
    /// A busy/timeout error from the swap means the outcome is unknown: the
    /// journal is re-read and the write counts as applied if it holds the
    /// planned mutation at the planned revision, even when later writers
    /// have since moved the anchor on.
    pub fn run<T, F>(&self, store: &dyn IAnchorStore, contact_id: &str, mut plan: F) -> WarmthResult<T>
    where
        F: FnMut(&Anchor) -> WarmthResult<Step<T>>,
    {
        for attempt in 1..=self.max_attempts {
            let current = store
                .get(contact_id)?
                .ok_or_else(|| WarmthError::not_found(contact_id))?;

            let (anchor, display, mutation, value) = match plan(&current)? {
                Step::Done(value) => return Ok(value),
                Step::Swap {
                    anchor,
                    display,
                    mutation,
                    value,
                } => (anchor, display, mutation, value),
            };

            match store.compare_and_swap(&current, &anchor, &display, &mutation) {
                Ok(CasOutcome::Swapped) => return Ok(value),
                Ok(CasOutcome::Conflict) => {
                    tracing::debug!(contact_id, attempt, "anchor changed underneath; retrying");
                }
                Err(WarmthError::Storage(StorageError::Busy { message })) => {
                    if landed(store, &anchor, &mutation)? {
                        tracing::info!(contact_id, attempt, "busy swap had committed; not reapplying");
                        return Ok(value);
                    }
                    tracing::debug!(contact_id, attempt, %message, "busy swap did not land; retrying");
                }
                Err(e) => return Err(e),
            }

            if attempt < self.max_attempts {
                std::thread::sleep(self.backoff(attempt));
            }
        }

        tracing::warn!(
            contact_id,
            attempts = self.max_attempts,
            "giving up after repeated anchor conflicts"
        );
        Err(WarmthError::ConcurrencyConflict {
            contact_id: contact_id.to_string(),
            attempts: self.max_attempts,
        })
    }
}

impl Default for CasRetry {
    fn default() -> Self {
        Self::from_config(&ConcurrencyConfig::default())
    }
}

fn landed(store: &dyn IAnchorStore, planned: &Anchor, mutation: &AnchorMutation) -> WarmthResult<bool> {
    Ok(store
        .history(&planned.contact_id)?
        .iter()
        .any(|entry| entry.revision() == planned.revision && entry == mutation))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_from_base() {
        let retry = CasRetry::new(3, 10);
        assert_eq!(retry.backoff(1), Duration::from_millis(10));
        assert_eq!(retry.backoff(2), Duration::from_millis(20));
        assert_eq!(retry.backoff(3), Duration::from_millis(40));
    }

    #[test]
    fn at_least_one_attempt() {
        assert_eq!(CasRetry::new(0, 10).max_attempts(), 1);
    }
}
