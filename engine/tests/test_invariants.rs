//! Property tests: conservation, capacity, and flush shape across the
//! whole supported ball range

use ball_clock_core::{ClockConfig, ClockEngine, Event, TickOutcome, TrackKind};
use proptest::prelude::*;

proptest! {
    /// Between any two steps, every ball is accounted for exactly once
    /// and no track exceeds its capacity.
    #[test]
    fn conservation_and_capacity_hold(num_balls in 27usize..=127, steps in 1usize..2_000) {
        let mut engine = ClockEngine::new(ClockConfig::new(num_balls)).unwrap();

        for _ in 0..steps {
            engine.tick().unwrap();

            let state = engine.state();
            prop_assert_eq!(state.total_balls(), num_balls);
            prop_assert!(state.track(TrackKind::Minute).len() <= 4);
            prop_assert!(state.track(TrackKind::FiveMinute).len() <= 11);
            prop_assert!(state.track(TrackKind::Hour).len() <= 11);
        }
    }

    /// Every flush event has the shape the mechanism dictates: minute
    /// flushes return 4 and forward; five-minute flushes return 11 and
    /// forward; hour flushes return 12 (reversed 11 plus the tripping
    /// ball) and never forward.
    #[test]
    fn flush_events_have_mechanical_shape(num_balls in 27usize..=127) {
        let config = ClockConfig::new(num_balls).with_event_recording();
        let mut engine = ClockEngine::new(config).unwrap();
        for _ in 0..3_000 {
            engine.tick().unwrap();
        }

        for event in engine.event_log().events() {
            if let Event::TrackFlushed { track, returned, forwarded, .. } = event {
                match track {
                    TrackKind::Minute => {
                        prop_assert_eq!(*returned, 4);
                        prop_assert!(*forwarded);
                    }
                    TrackKind::FiveMinute => {
                        prop_assert_eq!(*returned, 11);
                        prop_assert!(*forwarded);
                    }
                    TrackKind::Hour => {
                        prop_assert_eq!(*returned, 12);
                        prop_assert!(!*forwarded);
                    }
                }
            }
        }
    }
}

/// Exhaustive sweep of the supported range: one simulated day per count.
#[test]
fn test_conservation_across_full_supported_range() {
    for num_balls in 27..=127 {
        let mut engine = ClockEngine::new(ClockConfig::new(num_balls)).unwrap();
        for _ in 0..1_440 {
            match engine.tick().unwrap() {
                TickOutcome::Advanced(_) => {
                    assert_eq!(engine.state().total_balls(), num_balls);
                }
                TickOutcome::CycleComplete(_) => break,
            }
        }
    }
}

/// A dispatched ball is always absorbed within the same step: between
/// steps the queue can only hold all N balls at a true rest point.
#[test]
fn test_queue_full_only_at_rest_points() {
    let mut engine = ClockEngine::new(ClockConfig::new(27)).unwrap();

    loop {
        match engine.tick().unwrap() {
            TickOutcome::Advanced(_) => {
                if engine.state().all_home() {
                    assert_eq!(engine.state().balls_in_tracks(), 0);
                }
            }
            TickOutcome::CycleComplete(_) => break,
        }
    }
}
