//! Clock state
//!
//! Represents the complete state of the clock between ticks: the main
//! dispatch queue plus the three holding tracks. `ClockState` is the sole
//! owner of every ball in the system; tracks receive and return balls by
//! value and never hold a reference to the queue.
//!
//! # Critical Invariants
//!
//! 1. **Conservation**: `queue + minute + five_minute + hour` always holds
//!    exactly `num_balls` balls between ticks
//! 2. **Single owner**: only this struct (driven by the engine) mutates the
//!    main queue
//! 3. **Capacity**: no track holds more than its capacity between ticks

use crate::models::ball::Ball;
use crate::models::track::{Track, TrackKind};
use std::collections::VecDeque;

/// Main queue plus the three holding tracks
///
/// # Example
///
/// ```
/// use ball_clock_core::models::ball::identity_rack;
/// use ball_clock_core::models::state::ClockState;
///
/// let state = ClockState::new(identity_rack(27));
/// assert_eq!(state.num_balls(), 27);
/// assert!(state.all_home());
/// assert!(state.is_in_original_order());
/// ```
#[derive(Debug, Clone)]
pub struct ClockState {
    /// Balls awaiting dispatch, front = next to run
    main_queue: VecDeque<Ball>,

    minute_track: Track,
    five_minute_track: Track,
    hour_track: Track,

    /// Total balls in the system, fixed at construction
    num_balls: usize,
}

impl ClockState {
    /// Create a state with the given rack of balls in the main queue
    /// and all tracks empty
    pub fn new(balls: Vec<Ball>) -> Self {
        let num_balls = balls.len();
        Self {
            main_queue: balls.into(),
            minute_track: Track::new(TrackKind::Minute),
            five_minute_track: Track::new(TrackKind::FiveMinute),
            hour_track: Track::new(TrackKind::Hour),
            num_balls,
        }
    }

    /// Reconstruct a state from restored parts
    ///
    /// Used by checkpoint restore, after snapshot validation has already
    /// established conservation and capacity.
    pub(crate) fn from_parts(
        main_queue: VecDeque<Ball>,
        minute_track: Track,
        five_minute_track: Track,
        hour_track: Track,
        num_balls: usize,
    ) -> Self {
        Self {
            main_queue,
            minute_track,
            five_minute_track,
            hour_track,
            num_balls,
        }
    }

    /// Total balls in the system (fixed)
    pub fn num_balls(&self) -> usize {
        self.num_balls
    }

    /// Balls currently awaiting dispatch, front first
    pub fn main_queue(&self) -> &VecDeque<Ball> {
        &self.main_queue
    }

    /// Reference to a track by position in the chain
    pub fn track(&self, kind: TrackKind) -> &Track {
        match kind {
            TrackKind::Minute => &self.minute_track,
            TrackKind::FiveMinute => &self.five_minute_track,
            TrackKind::Hour => &self.hour_track,
        }
    }

    /// Mutable reference to a track by position in the chain
    pub(crate) fn track_mut(&mut self, kind: TrackKind) -> &mut Track {
        match kind {
            TrackKind::Minute => &mut self.minute_track,
            TrackKind::FiveMinute => &mut self.five_minute_track,
            TrackKind::Hour => &mut self.hour_track,
        }
    }

    /// Pop the next ball to dispatch, front of the queue
    pub(crate) fn pop_next_ball(&mut self) -> Option<Ball> {
        self.main_queue.pop_front()
    }

    /// Append flushed balls to the back of the queue, preserving their order
    pub(crate) fn return_balls(&mut self, balls: impl IntoIterator<Item = Ball>) {
        self.main_queue.extend(balls);
    }

    /// Balls currently held across all tracks
    pub fn balls_in_tracks(&self) -> usize {
        self.minute_track.len() + self.five_minute_track.len() + self.hour_track.len()
    }

    /// Balls accounted for across queue and tracks
    ///
    /// Equals `num_balls()` between ticks; conservation tests assert this.
    pub fn total_balls(&self) -> usize {
        self.main_queue.len() + self.balls_in_tracks()
    }

    /// True when every ball is parked in the main queue (no ball mid-track)
    ///
    /// Sound as a rest detector only because the combined track capacity
    /// is below the minimum supported ball count.
    pub fn all_home(&self) -> bool {
        self.main_queue.len() == self.num_balls
    }

    /// True when the queue order matches the original rack order
    ///
    /// Compares each queue position against the ball's original position,
    /// front = 0, short-circuiting on the first mismatch.
    pub fn is_in_original_order(&self) -> bool {
        self.main_queue
            .iter()
            .enumerate()
            .all(|(i, ball)| ball.original_position() == i)
    }
}
