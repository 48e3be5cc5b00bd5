//! Integration tests: spawn, release and interruption scenarios.
//!
//! Drives whole playfields through the lockstep `step` API and checks the
//! slot registry, token pool and presenter stream after each scenario.

mod common;

use burrow_core::{DepthKey, SlotId, TokenId, Vec2, OFF_STAGE};
use burrow_engine::{HitEvent, Phase, Playfield, PlayfieldConfig, ReleaseCause, Tuning};
use burrow_test_utils::fixtures::{row_layout, row_position};
use burrow_test_utils::PresenterEvent;

use common::{fast_tuning, headless, recorded, DT, LIFETIME_FRAMES};

// ── Scenario: 20 slots, 10 pre-warmed tokens ────────────────────────

#[test]
fn twenty_slots_ten_tokens_first_frame() {
    let config = PlayfieldConfig::new(row_layout(20));
    assert_eq!(config.tuning.prewarm_tokens, 10);
    let mut field = Playfield::headless(config).unwrap();

    let spawn = field.step(1.0 / 60.0, &[]).spawned.expect("first frame spawns");

    assert_eq!(field.slots().free_count(), 19);
    assert!(field.slots().is_occupied(spawn.slot));
    assert_eq!(field.tokens().in_use_count(), 1);
    assert_eq!(field.tokens().available_count(), 9);
    assert_eq!(field.tokens().len(), 10);

    assert!(field.interrupt(spawn.activation));
    assert_eq!(field.slots().free_count(), 20);
    assert_eq!(field.tokens().available_count(), 10);
    let parked = field.peek_token(spawn.activation.token).unwrap();
    assert_eq!(parked.position(), OFF_STAGE);
    assert_eq!(parked.phase(), Phase::Idle);
    field.audit().unwrap();
}

// ── Natural lifecycle ───────────────────────────────────────────────

#[test]
fn token_rises_holds_and_falls_back_to_lower_bound() {
    let tuning = Tuning {
        spawn_interval_secs: 100.0,
        ..fast_tuning()
    };
    let (mut field, log) = recorded(1, tuning);
    let spawn = field.step(DT, &[]).spawned.unwrap();
    assert_eq!(spawn.slot, SlotId(0));
    let token = spawn.activation.token;

    let mut frames = 1;
    let release = loop {
        let report = field.step(DT, &[]);
        frames += 1;
        if let Some(&release) = report.releases.first() {
            break release;
        }
        assert!(frames < 100, "token never released");
    };
    assert_eq!(frames, LIFETIME_FRAMES);
    assert_eq!(release.cause, ReleaseCause::Completed);
    assert_eq!(release.activation, spawn.activation);

    let base = row_position(0);
    let mut expected: Vec<Vec2> = [-1.0, -0.5, 0.0, 0.5, 1.0, 0.5, 0.0, -0.5, -1.0]
        .into_iter()
        .map(|dy| Vec2::new(base.x, base.y + dy))
        .collect();
    expected.push(OFF_STAGE);
    // The finishing frame lands on the lower bound before parking.
    assert_eq!(log.placements(token), expected);
    assert!(log.is_parked(token));
    assert_eq!(field.metrics().natural_releases, 1);

    // Interrupting a lifecycle that already completed changes nothing.
    assert!(!field.interrupt(spawn.activation));
    let m = field.metrics();
    assert_eq!(m.stale_interruptions, 1);
    assert_eq!(m.releases(), 1);
    field.audit().unwrap();
}

#[test]
fn spawn_sets_depth_from_slot() {
    let (mut field, log) = recorded(6, fast_tuning());
    let spawn = field.step(DT, &[]).spawned.unwrap();
    let depth = DepthKey::for_slot(spawn.slot);
    assert_eq!(
        log.events()[0],
        PresenterEvent::Depth {
            token: spawn.activation.token,
            depth,
        }
    );
    assert_eq!(field.token(spawn.activation).unwrap().depth, depth);
}

// ── Interruption ────────────────────────────────────────────────────

#[test]
fn hit_event_interrupts_before_motion() {
    let tuning = Tuning {
        spawn_interval_secs: 100.0,
        ..fast_tuning()
    };
    let (mut field, log) = recorded(3, tuning);
    let spawn = field.step(DT, &[]).spawned.unwrap();
    let at = field.token(spawn.activation).unwrap().position;

    let report = field.step(DT, &[HitEvent { point: at }]);
    assert_eq!(report.releases.len(), 1);
    assert_eq!(report.releases[0].cause, ReleaseCause::Interrupted);
    assert_eq!(report.releases[0].slot, spawn.slot);

    // Spawn placement, then straight off-stage: no motion that frame.
    assert_eq!(
        log.placements(spawn.activation.token),
        vec![at, OFF_STAGE]
    );
    assert_eq!(field.metrics().interruptions, 1);
    assert_eq!(field.active_count(), 0);
    field.audit().unwrap();
}

#[test]
fn interrupt_mid_rise_releases_without_holding_or_falling() {
    let tuning = Tuning {
        spawn_interval_secs: 100.0,
        ..fast_tuning()
    };
    let (mut field, log) = recorded(2, tuning);
    let a = field.step(DT, &[]).spawned.unwrap().activation;
    field.step(DT, &[]);
    field.step(DT, &[]);
    // Halfway from -1 to +1.
    let view = field.token(a).unwrap();
    assert_eq!(view.phase, Phase::Rising);
    assert_eq!(view.position.y, 0.0);

    assert!(field.interrupt(a));
    let ys: Vec<f32> = log.placements(a.token).iter().map(|p| p.y).collect();
    assert_eq!(ys, vec![-1.0, -0.5, 0.0, OFF_STAGE.y]);

    for _ in 0..20 {
        assert!(field.step(DT, &[]).releases.is_empty());
    }
    assert_eq!(field.metrics().releases(), 1);
    assert_eq!(field.metrics().natural_releases, 0);
}

#[test]
fn interruption_is_idempotent() {
    let mut field = headless(4, fast_tuning());
    let a = field.step(DT, &[]).spawned.unwrap().activation;
    let at = field.token(a).unwrap().position;

    let report = field.step(DT, &[HitEvent { point: at }, HitEvent { point: at }]);
    assert_eq!(report.releases.len(), 1);
    assert!(!field.interrupt(a));

    let m = field.metrics();
    assert_eq!(m.interruptions, 1);
    assert_eq!(m.missed_hits, 1);
    assert_eq!(m.stale_interruptions, 1);
    assert_eq!(field.slots().free_count(), 4 - field.active_count());
    field.audit().unwrap();
}

#[test]
fn stale_activation_does_not_touch_reused_token() {
    // One slot, one token: the second lifecycle reuses both.
    let tuning = Tuning {
        prewarm_tokens: 1,
        spawn_interval_secs: 0.0,
        ..fast_tuning()
    };
    let mut field = headless(1, tuning);
    let first = field.step(DT, &[]).spawned.unwrap().activation;
    assert!(field.interrupt(first));

    let second = field.step(DT, &[]).spawned.unwrap().activation;
    assert_eq!(second.token, first.token);
    assert_eq!(second.generation, first.generation + 1);

    assert!(!field.interrupt(first));
    assert!(field.token(second).is_some());
    assert_eq!(field.occupant(SlotId(0)), Some(second));
    field.audit().unwrap();
}

#[test]
fn hit_in_empty_space_misses() {
    let mut field = headless(2, fast_tuning());
    field.step(DT, &[]);
    assert_eq!(field.hit(Vec2::new(-50.0, -50.0)), None);
    assert_eq!(field.metrics().missed_hits, 1);
    assert_eq!(field.active_count(), 1);
}

// ── Scheduling and pool growth ──────────────────────────────────────

#[test]
fn pool_grows_when_pre_warmed_tokens_run_out() {
    let tuning = Tuning {
        prewarm_tokens: 1,
        spawn_interval_secs: 0.0,
        ..fast_tuning()
    };
    let mut field = headless(5, tuning);
    for _ in 0..5 {
        assert!(field.step(DT, &[]).spawned.is_some());
    }
    assert_eq!(field.tokens().len(), 5);
    assert_eq!(field.tokens().available_count(), 0);
    assert_eq!(field.metrics().tokens_grown, 4);

    let ids: Vec<TokenId> = field.active_tokens().iter().map(|v| v.activation.token).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), 5, "every running token is distinct");
    field.audit().unwrap();
}

#[test]
fn eleventh_concurrent_token_is_built_on_demand() {
    let tuning = Tuning {
        prewarm_tokens: 10,
        spawn_interval_secs: 0.0,
        ..fast_tuning()
    };
    let mut field = headless(20, tuning);
    for _ in 0..11 {
        assert!(field.step(0.01, &[]).spawned.is_some());
    }
    assert_eq!(field.active_count(), 11);
    assert_eq!(field.tokens().len(), 11);
    assert_eq!(field.metrics().tokens_grown, 1);
    field.audit().unwrap();
}

#[test]
fn exhausted_slots_skip_and_retry_next_frame() {
    let tuning = Tuning {
        spawn_interval_secs: 0.0,
        ..fast_tuning()
    };
    let mut field = headless(1, tuning);
    let first = field.step(DT, &[]).spawned.unwrap();

    let mut skipped = 0;
    let rebind = loop {
        let report = field.step(DT, &[]);
        if let Some(spawn) = report.spawned {
            // Released and rebound in the same frame.
            assert_eq!(report.releases.len(), 1);
            break spawn;
        }
        skipped += 1;
    };
    assert_eq!(rebind.slot, first.slot);
    assert_eq!(skipped, LIFETIME_FRAMES - 2);
    assert_eq!(field.metrics().skipped_spawns, skipped);
    field.audit().unwrap();
}

#[test]
fn spawn_cadence_follows_interval() {
    let tuning = Tuning {
        spawn_interval_secs: 1.0,
        ..fast_tuning()
    };
    let mut field = headless(10, tuning);
    let spawned: Vec<bool> = (0..6)
        .map(|_| field.step(DT, &[]).spawned.is_some())
        .collect();
    assert_eq!(spawned, vec![true, false, true, false, true, false]);
}

// ── Determinism and reset ───────────────────────────────────────────

fn spawn_slots(field: &mut Playfield, frames: usize) -> Vec<Option<SlotId>> {
    (0..frames)
        .map(|_| field.step(DT, &[]).spawned.map(|s| s.slot))
        .collect()
}

#[test]
fn same_seed_same_slot_sequence() {
    let mut a = headless(12, fast_tuning());
    let mut b = headless(12, fast_tuning());
    assert_eq!(spawn_slots(&mut a, 40), spawn_slots(&mut b, 40));
}

#[test]
fn reset_replays_the_same_run() {
    let mut field = headless(12, fast_tuning());
    let first = spawn_slots(&mut field, 30);
    field.reset(fast_tuning().seed);
    assert_eq!(field.active_count(), 0);
    assert_eq!(spawn_slots(&mut field, 30), first);
    field.audit().unwrap();
}

#[test]
fn activation_from_before_reset_cannot_interrupt_new_lifecycle() {
    let mut field = headless(4, fast_tuning());
    let before = field.step(DT, &[]).spawned.unwrap().activation;
    field.reset(fast_tuning().seed);

    let after = field.step(DT, &[]).spawned.unwrap().activation;
    assert_ne!(after, before);
    assert!(!field.interrupt(before));
    assert!(field.token(after).is_some(), "new lifecycle still running");
    assert_eq!(field.metrics().stale_interruptions, 1);
    assert_eq!(field.metrics().interruptions, 0);
    field.audit().unwrap();
}
