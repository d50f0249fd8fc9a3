//! Tests for the holding tracks and the flush rule
//!
//! The flush rule is the heart of the mechanism: a track at capacity that
//! receives a ball empties in reverse arrival order, and what happens to
//! the tripping ball depends on the track.

use ball_clock_core::{Ball, Track, TrackKind, TrackOutcome};

#[test]
fn test_minute_track_holds_up_to_four() {
    let mut track = Track::new(TrackKind::Minute);

    for i in 0..4 {
        assert_eq!(track.receive(Ball::new(i)), TrackOutcome::Held);
        assert_eq!(track.len(), i + 1);
    }
    assert!(track.is_at_capacity());
    assert_eq!(track.held(), &[Ball::new(0), Ball::new(1), Ball::new(2), Ball::new(3)]);
}

#[test]
fn test_minute_track_fifth_ball_flushes_reversed_and_forwards() {
    let mut track = Track::new(TrackKind::Minute);
    for i in 0..4 {
        track.receive(Ball::new(i));
    }

    let outcome = track.receive(Ball::new(4));
    assert_eq!(
        outcome,
        TrackOutcome::Flushed {
            returned: vec![Ball::new(3), Ball::new(2), Ball::new(1), Ball::new(0)],
            forwarded: Some(Ball::new(4)),
        }
    );
    assert!(track.is_empty());
}

#[test]
fn test_five_minute_track_twelfth_ball_flushes_reversed_and_forwards() {
    let mut track = Track::new(TrackKind::FiveMinute);
    for i in 0..11 {
        assert_eq!(track.receive(Ball::new(i)), TrackOutcome::Held);
    }

    let outcome = track.receive(Ball::new(11));
    let expected_returned: Vec<Ball> = (0..11).rev().map(Ball::new).collect();
    assert_eq!(
        outcome,
        TrackOutcome::Flushed {
            returned: expected_returned,
            forwarded: Some(Ball::new(11)),
        }
    );
    assert!(track.is_empty());
}

#[test]
fn test_hour_track_ejects_tripping_ball_after_reversed_eleven() {
    let mut track = Track::new(TrackKind::Hour);
    for i in 0..11 {
        assert_eq!(track.receive(Ball::new(i)), TrackOutcome::Held);
    }

    // The 12th ball is not held: it follows the reversed 11 straight back
    // to the main queue, and nothing travels onward.
    let outcome = track.receive(Ball::new(11));
    let expected_returned: Vec<Ball> = (0..11).rev().map(Ball::new).chain([Ball::new(11)]).collect();
    assert_eq!(
        outcome,
        TrackOutcome::Flushed {
            returned: expected_returned,
            forwarded: None,
        }
    );
    assert!(track.is_empty());
}

#[test]
fn test_track_accepts_again_after_flush() {
    let mut track = Track::new(TrackKind::Minute);
    for i in 0..5 {
        track.receive(Ball::new(i));
    }
    assert!(track.is_empty());

    assert_eq!(track.receive(Ball::new(7)), TrackOutcome::Held);
    assert_eq!(track.held(), &[Ball::new(7)]);
}

#[test]
fn test_capacity_never_exceeded_while_held() {
    for kind in [TrackKind::Minute, TrackKind::FiveMinute, TrackKind::Hour] {
        let mut track = Track::new(kind);
        for i in 0..kind.capacity() * 3 {
            track.receive(Ball::new(i));
            assert!(track.len() <= kind.capacity(), "{:?} overfilled", kind);
        }
    }
}
