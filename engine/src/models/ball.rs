//! Ball model
//!
//! A ball is nothing more than an immutable integer tag: the position it
//! occupied in the rack before the clock started running. Balls carry no
//! other state and are freely copyable.

use serde::{Deserialize, Serialize};

/// A numbered ball moving through the clock mechanism
///
/// Identity is solely the original position. Two balls with the same
/// original position are the same ball.
///
/// # Example
/// ```
/// use ball_clock_core::Ball;
///
/// let ball = Ball::new(5);
/// assert_eq!(ball.original_position(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ball {
    original_position: usize,
}

impl Ball {
    /// Create a ball tagged with its original rack position
    pub fn new(original_position: usize) -> Self {
        Self { original_position }
    }

    /// The position this ball occupied before the first tick
    pub fn original_position(&self) -> usize {
        self.original_position
    }
}

/// Build the starting rack: `count` balls tagged 0..count-1 in order
///
/// # Example
/// ```
/// use ball_clock_core::models::ball::identity_rack;
///
/// let rack = identity_rack(27);
/// assert_eq!(rack.len(), 27);
/// assert_eq!(rack[0].original_position(), 0);
/// assert_eq!(rack[26].original_position(), 26);
/// ```
pub fn identity_rack(count: usize) -> Vec<Ball> {
    (0..count).map(Ball::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ball_identity() {
        assert_eq!(Ball::new(3), Ball::new(3));
        assert_ne!(Ball::new(3), Ball::new(4));
    }

    #[test]
    fn test_identity_rack_is_ordered() {
        let rack = identity_rack(30);
        for (i, ball) in rack.iter().enumerate() {
            assert_eq!(ball.original_position(), i);
        }
    }

    #[test]
    fn test_ball_serializes_as_plain_integer() {
        let json = serde_json::to_string(&Ball::new(12)).unwrap();
        assert_eq!(json, "12");
        let back: Ball = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Ball::new(12));
    }
}
