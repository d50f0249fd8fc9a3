//! Checkpoint save/restore tests

use ball_clock_core::orchestrator::checkpoint::validate_snapshot;
use ball_clock_core::{ClockConfig, ClockEngine, SimulationError, StateSnapshot};

#[test]
fn test_restored_run_matches_uninterrupted_run() {
    let config = ClockConfig::new(27);

    let expected = ClockEngine::new(config.clone()).unwrap().run().unwrap();

    // Run partway, snapshot, resume in a fresh engine
    let mut engine = ClockEngine::new(config.clone()).unwrap();
    for _ in 0..10_000 {
        engine.tick().unwrap();
    }
    let snapshot = engine.snapshot().unwrap();
    assert_eq!(snapshot.current_tick, 10_000);

    let mut resumed = ClockEngine::from_snapshot(config, &snapshot).unwrap();
    let report = resumed.run().unwrap();

    assert_eq!(report, expected);
}

#[test]
fn test_snapshot_survives_json_round_trip() {
    let mut engine = ClockEngine::new(ClockConfig::new(30)).unwrap();
    for _ in 0..777 {
        engine.tick().unwrap();
    }

    let snapshot = engine.snapshot().unwrap();
    let json = serde_json::to_string(&snapshot).unwrap();
    let back: StateSnapshot = serde_json::from_str(&json).unwrap();

    assert_eq!(back, snapshot);
}

#[test]
fn test_restore_rejects_config_mismatch() {
    let engine = ClockEngine::new(ClockConfig::new(27)).unwrap();
    let snapshot = engine.snapshot().unwrap();

    let err = ClockEngine::from_snapshot(ClockConfig::new(28), &snapshot).unwrap_err();
    assert!(matches!(err, SimulationError::ConfigMismatch { .. }));
}

#[test]
fn test_restore_rejects_overfull_track() {
    let config = ClockConfig::new(27);
    let mut snapshot = ClockEngine::new(config.clone()).unwrap().snapshot().unwrap();

    // Cram five balls into the minute track; conservation still holds,
    // capacity does not.
    snapshot.minute_track = snapshot.main_queue.drain(..5).collect();

    let err = ClockEngine::from_snapshot(config, &snapshot).unwrap_err();
    assert!(matches!(err, SimulationError::StateValidation(_)));
}

#[test]
fn test_validate_rejects_missing_ball() {
    let config = ClockConfig::new(27);
    let mut snapshot = ClockEngine::new(config.clone()).unwrap().snapshot().unwrap();
    snapshot.main_queue.pop();

    assert!(matches!(
        validate_snapshot(&snapshot, &config),
        Err(SimulationError::StateValidation(_))
    ));
}

#[test]
fn test_tick_zero_restore_still_skips_first_order_check() {
    let config = ClockConfig::new(27);
    let snapshot = ClockEngine::new(config.clone()).unwrap().snapshot().unwrap();

    let mut restored = ClockEngine::from_snapshot(config, &snapshot).unwrap();
    let outcome = restored.tick().unwrap();

    // A tick-0 snapshot holds the untouched identity rack; restoring it
    // must not terminate on the spot.
    assert!(matches!(
        outcome,
        ball_clock_core::TickOutcome::Advanced(_)
    ));
}
