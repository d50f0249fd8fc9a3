//! Time management for the clock simulation
//!
//! The simulation operates in discrete ticks, one per ball dispatched from
//! the main queue. A tick models one minute on the clock face, so 1440
//! ticks make one simulated day. This module provides deterministic,
//! monotonic time advancement.

use serde::{Deserialize, Serialize};

/// Ticks (simulated minutes) in one day.
pub const TICKS_PER_DAY: usize = 1440;

/// Manages simulation time in discrete ticks and days
///
/// # Example
/// ```
/// use ball_clock_core::TimeManager;
///
/// let mut time = TimeManager::new(1440); // 1440 ticks per day
/// assert_eq!(time.current_tick(), 0);
/// assert_eq!(time.elapsed_days(), 0);
///
/// time.advance_tick();
/// assert_eq!(time.current_tick(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeManager {
    /// Total ticks elapsed since simulation start
    current_tick: usize,
    /// Number of ticks in one day
    ticks_per_day: usize,
}

impl TimeManager {
    /// Create a new TimeManager
    ///
    /// # Arguments
    /// * `ticks_per_day` - Number of ticks in one simulated day
    ///
    /// # Panics
    /// Panics if `ticks_per_day` is zero. Callers going through
    /// `ClockConfig` validation never hit this.
    pub fn new(ticks_per_day: usize) -> Self {
        assert!(ticks_per_day > 0, "ticks_per_day must be positive");
        Self {
            current_tick: 0,
            ticks_per_day,
        }
    }

    /// Restore a TimeManager at an arbitrary tick position
    pub(crate) fn at_tick(ticks_per_day: usize, current_tick: usize) -> Self {
        let mut time = Self::new(ticks_per_day);
        time.current_tick = current_tick;
        time
    }

    /// Advance time by one tick
    pub fn advance_tick(&mut self) {
        self.current_tick += 1;
    }

    /// Get the current tick (total ticks since start)
    pub fn current_tick(&self) -> usize {
        self.current_tick
    }

    /// Get elapsed whole days (floor division)
    ///
    /// # Example
    /// ```
    /// use ball_clock_core::TimeManager;
    ///
    /// let mut time = TimeManager::new(1440);
    /// for _ in 0..1440 {
    ///     time.advance_tick();
    /// }
    /// assert_eq!(time.elapsed_days(), 1);
    /// ```
    pub fn elapsed_days(&self) -> usize {
        self.current_tick / self.ticks_per_day
    }

    /// Get the tick within the current day (0-indexed)
    pub fn tick_within_day(&self) -> usize {
        self.current_tick % self.ticks_per_day
    }

    /// Get ticks per day
    pub fn ticks_per_day(&self) -> usize {
        self.ticks_per_day
    }
}

impl Default for TimeManager {
    fn default() -> Self {
        Self::new(TICKS_PER_DAY)
    }
}
