//! Tests for ClockState's public surface

use ball_clock_core::models::ball::identity_rack;
use ball_clock_core::{Ball, ClockState, TrackKind};

#[test]
fn test_new_state_starts_at_rest() {
    let state = ClockState::new(identity_rack(27));

    assert_eq!(state.num_balls(), 27);
    assert_eq!(state.total_balls(), 27);
    assert_eq!(state.balls_in_tracks(), 0);
    assert!(state.all_home());

    for kind in [TrackKind::Minute, TrackKind::FiveMinute, TrackKind::Hour] {
        assert!(state.track(kind).is_empty());
        assert_eq!(state.track(kind).kind(), kind);
    }
}

#[test]
fn test_identity_rack_is_in_original_order() {
    let state = ClockState::new(identity_rack(45));
    assert!(state.is_in_original_order());
}

#[test]
fn test_rotated_rack_is_not_in_original_order() {
    let mut balls = identity_rack(27);
    balls.rotate_left(1);
    let state = ClockState::new(balls);

    assert!(state.all_home());
    assert!(!state.is_in_original_order());
}

#[test]
fn test_order_check_detects_mismatch_at_back() {
    let mut balls = identity_rack(27);
    balls.swap(25, 26);
    let state = ClockState::new(balls);
    assert!(!state.is_in_original_order());
}

#[test]
fn test_main_queue_preserves_supplied_order() {
    let balls = vec![Ball::new(2), Ball::new(0), Ball::new(1)];
    let state = ClockState::new(balls.clone());

    let queued: Vec<Ball> = state.main_queue().iter().copied().collect();
    assert_eq!(queued, balls);
}
