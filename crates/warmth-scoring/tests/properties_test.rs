use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use proptest::prelude::*;
use warmth_core::clock::{Clock, ManualClock};
use warmth_core::config::WarmthConfig;
use warmth_core::models::{Channel, DecayMode, Direction, InteractionEvent};
use warmth_core::traits::IAnchorStore;
use warmth_scoring::ScoringService;
use warmth_storage::StorageEngine;

fn t0() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(1_750_000_000_000).unwrap()
}

fn arb_mode() -> impl Strategy<Value = DecayMode> {
    prop_oneof![
        Just(DecayMode::Slow),
        Just(DecayMode::Medium),
        Just(DecayMode::Fast),
    ]
}

fn arb_channel() -> impl Strategy<Value = Channel> {
    prop_oneof![
        Just(Channel::Email),
        Just(Channel::Sms),
        Just(Channel::Dm),
        Just(Channel::Call),
        Just(Channel::Meeting),
        Just(Channel::Note),
        Just(Channel::Other),
    ]
}

#[derive(Debug, Clone)]
enum Op {
    Wait(i64),
    Switch(DecayMode),
    Boost(Channel),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1i64..10_000_000_000).prop_map(Op::Wait),
        arb_mode().prop_map(Op::Switch),
        arb_channel().prop_map(Op::Boost),
    ]
}

fn service() -> (ScoringService, Arc<ManualClock>) {
    let store: Arc<dyn IAnchorStore> = Arc::new(StorageEngine::open_in_memory().unwrap());
    let clock = Arc::new(ManualClock::at(t0()));
    (
        ScoringService::new(store, clock.clone(), &WarmthConfig::default()),
        clock,
    )
}

// ── Continuity across mode switches ──────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn switch_is_continuous(
        score in 0.0f64..=100.0,
        elapsed_ms in 0i64..5_000_000_000,
        from in arb_mode(),
        to in arb_mode(),
    ) {
        let (service, clock) = service();
        service.create_anchor("c", Some(from), Some(score)).unwrap();
        clock.advance(Duration::milliseconds(elapsed_ms));

        let before = service.read("c").unwrap().score;
        let result = service.switch_mode("c", to).unwrap();
        let after = service.read("c").unwrap().score;

        prop_assert!((result.score_after - result.score_before).abs() <= 0.01);
        prop_assert!((before - after).abs() <= 1e-6, "{} vs {}", before, after);
    }
}

// ── Any operation sequence stays bounded and replayable ──────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn random_histories_stay_consistent(
        start in 0.0f64..=100.0,
        ops in proptest::collection::vec(arb_op(), 1..20),
    ) {
        let (service, clock) = service();
        service.create_anchor("c", None, Some(start)).unwrap();

        for op in ops {
            match op {
                Op::Wait(ms) => { clock.advance(Duration::milliseconds(ms)); }
                Op::Switch(mode) => { service.switch_mode("c", mode).unwrap(); }
                Op::Boost(channel) => {
                    let before = service.read("c").unwrap().score;
                    let outcome = service.on_interaction(&InteractionEvent {
                        contact_id: "c".into(),
                        occurred_at: clock.now(),
                        channel,
                        direction: Direction::Inbound,
                    }).unwrap();
                    prop_assert!(outcome.applied);
                    prop_assert!(outcome.score_after >= before - 1e-9);
                }
            }
            let score = service.read("c").unwrap().score;
            prop_assert!((0.0..=100.0).contains(&score));
        }

        let report = service.consistency("c").unwrap();
        prop_assert!(report.consistent, "{:?}", report.violations);
    }
}
