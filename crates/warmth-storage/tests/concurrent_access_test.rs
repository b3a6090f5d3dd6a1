use std::sync::Arc;
use std::thread;

use chrono::{DateTime, Duration, Utc};
use warmth_core::config::StorageConfig;
use warmth_core::models::{Anchor, AnchorMutation, Band, DecayMode, DisplaySnapshot, ModeChangeLogEntry};
use warmth_core::traits::{CasOutcome, IAnchorStore};
use warmth_storage::pool::pragmas::verify_wal_mode;
use warmth_storage::StorageEngine;

fn t0() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(1_750_000_000_000).unwrap()
}

fn switch(from: &Anchor, mode: DecayMode, offset_ms: i64) -> (Anchor, DisplaySnapshot, AnchorMutation) {
    let at = from.anchor_at + Duration::milliseconds(offset_ms);
    let next = from.successor(from.score, at, mode);
    let display = DisplaySnapshot {
        band: Band::Warm,
        score_cached: next.score.round() as i64,
        cached_at: at,
    };
    let mutation = AnchorMutation::ModeChange(ModeChangeLogEntry {
        contact_id: from.contact_id.clone(),
        from_mode: from.mode,
        to_mode: mode,
        score_before: from.score,
        score_after: next.score,
        created_at: at,
        revision: next.revision,
    });
    (next, display, mutation)
}

#[test]
fn file_backed_store_uses_wal() {
    let dir = tempfile::tempdir().unwrap();
    let engine = StorageEngine::open(&dir.path().join("warmth.db")).unwrap();
    let wal = engine
        .pool()
        .writer
        .with_conn_sync(verify_wal_mode)
        .unwrap();
    assert!(wal);
}

#[test]
fn only_file_backed_stores_open_readers() {
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig {
        db_path: dir.path().join("warmth.db").display().to_string(),
        read_pool_size: 3,
        ..StorageConfig::default()
    };
    let file = StorageEngine::from_config(&config).unwrap();
    assert_eq!(file.pool().readers.as_ref().map(|r| r.size()), Some(3));

    let memory = StorageEngine::open_in_memory().unwrap();
    assert!(memory.pool().readers.is_none());
    let anchor = Anchor::new("c-1", 70.0, t0(), DecayMode::Medium);
    let display = DisplaySnapshot {
        band: Band::Warm,
        score_cached: 70,
        cached_at: t0(),
    };
    memory.create(&anchor, &display).unwrap();
    assert_eq!(memory.get("c-1").unwrap(), Some(anchor));
}

#[test]
fn racing_writers_from_one_snapshot_have_exactly_one_winner() {
    let dir = tempfile::tempdir().unwrap();
    let engine = Arc::new(StorageEngine::open(&dir.path().join("warmth.db")).unwrap());
    let origin = Anchor::new("c-1", 60.0, t0(), DecayMode::Medium);
    engine
        .create(
            &origin,
            &DisplaySnapshot { band: Band::Warm, score_cached: 60, cached_at: t0() },
        )
        .unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let engine = Arc::clone(&engine);
            let origin = origin.clone();
            thread::spawn(move || {
                let mode = if i % 2 == 0 { DecayMode::Fast } else { DecayMode::Slow };
                let (next, display, mutation) = switch(&origin, mode, i as i64 + 1);
                engine.compare_and_swap(&origin, &next, &display, &mutation).unwrap()
            })
        })
        .collect();

    let outcomes: Vec<CasOutcome> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let winners = outcomes.iter().filter(|o| **o == CasOutcome::Swapped).count();
    assert_eq!(winners, 1);

    let stored = engine.get("c-1").unwrap().unwrap();
    assert_eq!(stored.revision, 1);
    assert_eq!(engine.history("c-1").unwrap().len(), 1);
}

#[test]
fn readers_see_committed_swaps() {
    let dir = tempfile::tempdir().unwrap();
    let engine = StorageEngine::open(&dir.path().join("warmth.db")).unwrap();
    let origin = Anchor::new("c-1", 60.0, t0(), DecayMode::Medium);
    engine
        .create(
            &origin,
            &DisplaySnapshot { band: Band::Warm, score_cached: 60, cached_at: t0() },
        )
        .unwrap();

    let mut current = origin;
    for step in 0..5 {
        let mode = DecayMode::ALL[step % 3];
        let (next, display, mutation) = switch(&current, mode, 1_000);
        assert_eq!(
            engine.compare_and_swap(&current, &next, &display, &mutation).unwrap(),
            CasOutcome::Swapped
        );
        // Read pool, not the writer.
        assert_eq!(engine.get("c-1").unwrap().unwrap(), next);
        current = next;
    }
    assert_eq!(engine.mode_changes("c-1").unwrap().len(), 5);
}
