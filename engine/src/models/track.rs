//! Holding tracks and the flush rule
//!
//! The clock routes every dispatched ball through a chain of bounded
//! holding tracks: minute (capacity 4), five-minute (capacity 11), and
//! hour (capacity 11). A track accumulates balls until it is at capacity;
//! the next ball to arrive trips it, and the held balls roll back to the
//! main queue in reverse arrival order.
//!
//! What happens to the tripping ball is where the hour track differs:
//!
//! - **Minute / five-minute**: the tripping ball travels onward to the
//!   next track in the chain.
//! - **Hour**: the tripping ball is ejected straight to the main queue,
//!   immediately after the reversed balls. The hour track is the terminal
//!   stage and never forwards.
//!
//! The hour-track asymmetry changes the relative order of balls re-entering
//! the main queue and is load-bearing for the cycle length.
//!
//! # Critical Invariants
//!
//! 1. A track never holds more than its capacity between ticks
//! 2. A flush empties the track completely in the same step
//! 3. Flushed balls re-enter the queue in reverse arrival order

use crate::models::ball::Ball;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minute track capacity: the 5th ball trips it.
pub const MINUTE_TRACK_CAPACITY: usize = 4;

/// Five-minute track capacity: the 12th ball trips it.
pub const FIVE_MINUTE_TRACK_CAPACITY: usize = 11;

/// Hour track capacity: the 12th ball trips it.
pub const HOUR_TRACK_CAPACITY: usize = 11;

/// Combined capacity of the whole track chain.
///
/// The all-home termination check is sound only for ball counts strictly
/// greater than this (see `ClockConfig` validation).
pub const TOTAL_TRACK_CAPACITY: usize =
    MINUTE_TRACK_CAPACITY + FIVE_MINUTE_TRACK_CAPACITY + HOUR_TRACK_CAPACITY;

/// Errors that can occur when reconstructing a track from saved state
#[derive(Debug, Error, PartialEq)]
pub enum TrackError {
    #[error("{kind:?} track cannot hold {count} balls (capacity {capacity})")]
    OverCapacity {
        kind: TrackKind,
        count: usize,
        capacity: usize,
    },
}

/// The three track positions in the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackKind {
    /// First stage, capacity 4
    Minute,
    /// Second stage, capacity 11
    FiveMinute,
    /// Terminal stage, capacity 11; ejects its tripping ball
    Hour,
}

impl TrackKind {
    /// Capacity of this track
    pub fn capacity(&self) -> usize {
        match self {
            TrackKind::Minute => MINUTE_TRACK_CAPACITY,
            TrackKind::FiveMinute => FIVE_MINUTE_TRACK_CAPACITY,
            TrackKind::Hour => HOUR_TRACK_CAPACITY,
        }
    }

    /// Next track in the chain, if any
    ///
    /// The hour track is terminal: a ball tripping it goes back to the
    /// main queue, not onward.
    pub fn next(&self) -> Option<TrackKind> {
        match self {
            TrackKind::Minute => Some(TrackKind::FiveMinute),
            TrackKind::FiveMinute => Some(TrackKind::Hour),
            TrackKind::Hour => None,
        }
    }
}

/// Result of delivering one ball to a track
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackOutcome {
    /// The track absorbed the ball; the step ends here
    Held,

    /// The track was at capacity and flushed
    Flushed {
        /// Held balls, already reversed, destined for the back of the
        /// main queue
        returned: Vec<Ball>,
        /// The tripping ball, travelling to the next track
        /// (`None` for the hour track, which ejects it via `returned`)
        forwarded: Option<Ball>,
    },
}

/// A bounded holding track
///
/// # Example
/// ```
/// use ball_clock_core::models::track::{Track, TrackKind, TrackOutcome};
/// use ball_clock_core::Ball;
///
/// let mut track = Track::new(TrackKind::Minute);
/// for i in 0..4 {
///     assert_eq!(track.receive(Ball::new(i)), TrackOutcome::Held);
/// }
/// assert!(track.is_at_capacity());
///
/// // The 5th ball trips the track: 4 roll back reversed, the 5th moves on
/// match track.receive(Ball::new(4)) {
///     TrackOutcome::Flushed { returned, forwarded } => {
///         assert_eq!(returned, vec![Ball::new(3), Ball::new(2), Ball::new(1), Ball::new(0)]);
///         assert_eq!(forwarded, Some(Ball::new(4)));
///     }
///     TrackOutcome::Held => unreachable!(),
/// }
/// assert!(track.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    kind: TrackKind,
    /// Held balls in arrival order (oldest first)
    held: Vec<Ball>,
}

impl Track {
    /// Create an empty track
    pub fn new(kind: TrackKind) -> Self {
        Self {
            kind,
            held: Vec::with_capacity(kind.capacity()),
        }
    }

    /// Reconstruct a track from saved held balls (arrival order)
    ///
    /// # Errors
    ///
    /// Returns `TrackError::OverCapacity` if more balls are supplied than
    /// the track can hold.
    pub fn from_held(kind: TrackKind, held: Vec<Ball>) -> Result<Self, TrackError> {
        if held.len() > kind.capacity() {
            return Err(TrackError::OverCapacity {
                kind,
                count: held.len(),
                capacity: kind.capacity(),
            });
        }
        Ok(Self { kind, held })
    }

    /// Which track this is
    pub fn kind(&self) -> TrackKind {
        self.kind
    }

    /// Capacity of this track
    pub fn capacity(&self) -> usize {
        self.kind.capacity()
    }

    /// Number of balls currently held
    pub fn len(&self) -> usize {
        self.held.len()
    }

    /// True if no balls are held
    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    /// True if the next arrival will trip the track
    pub fn is_at_capacity(&self) -> bool {
        self.held.len() == self.kind.capacity()
    }

    /// Held balls in arrival order (oldest first)
    pub fn held(&self) -> &[Ball] {
        &self.held
    }

    /// Deliver one ball to this track
    ///
    /// Below capacity the ball is appended and held. At capacity the track
    /// flushes: held balls come back reversed (last-held first) for the
    /// main queue, and the tripping ball either travels onward
    /// (minute, five-minute) or is appended after the reversed balls
    /// (hour).
    pub fn receive(&mut self, ball: Ball) -> TrackOutcome {
        if !self.is_at_capacity() {
            self.held.push(ball);
            return TrackOutcome::Held;
        }

        let mut returned = self.flush_reversed();
        match self.kind {
            TrackKind::Hour => {
                // Terminal stage: the tripping ball goes home too,
                // directly after the reversed balls.
                returned.push(ball);
                TrackOutcome::Flushed {
                    returned,
                    forwarded: None,
                }
            }
            _ => TrackOutcome::Flushed {
                returned,
                forwarded: Some(ball),
            },
        }
    }

    /// Drain all held balls in reverse arrival order
    fn flush_reversed(&mut self) -> Vec<Ball> {
        let mut balls: Vec<Ball> = self.held.drain(..).collect();
        balls.reverse();
        balls
    }
}
