//! Clock engine - the dispatch loop
//!
//! Integrates the components into the per-tick cycle:
//!
//! ```text
//! For each tick t:
//! 1. If every ball is home and the queue matches the original order,
//!    terminate (skipped on the very first step, when the rack trivially
//!    matches)
//! 2. Pop the front ball from the main queue, advance the tick counter
//! 3. Route the ball through minute -> five-minute -> hour, appending
//!    flushed balls to the back of the queue, until a track absorbs it
//! ```
//!
//! The chain is a direct sequential function call per tick. The engine is
//! the single owner of all state, so step order is deterministic by
//! construction: same ball count, same tick count, same day count, every
//! run.
//!
//! # Example
//!
//! ```
//! use ball_clock_core::{compute_cycle, ClockConfig, ClockEngine};
//!
//! // One-call form
//! let report = compute_cycle(30).unwrap();
//! assert_eq!(report.days, 15);
//!
//! // Stepwise form
//! let mut engine = ClockEngine::new(ClockConfig::new(30)).unwrap();
//! let report = engine.run().unwrap();
//! assert_eq!(report.total_ticks, 21_600);
//! ```

use crate::core::time::{TimeManager, TICKS_PER_DAY};
use crate::models::ball::{identity_rack, Ball};
use crate::models::event::{Event, EventLog};
use crate::models::state::ClockState;
use crate::models::track::{TrackKind, TrackOutcome, TOTAL_TRACK_CAPACITY};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

// ============================================================================
// Configuration
// ============================================================================

/// Complete engine configuration
///
/// # Example
///
/// ```
/// use ball_clock_core::ClockConfig;
///
/// let config = ClockConfig::new(45);
/// assert_eq!(config.num_balls, 45);
/// assert_eq!(config.ticks_per_day, 1440);
/// assert_eq!(config.max_ticks, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Number of balls in the rack
    pub num_balls: usize,

    /// Ticks (simulated minutes) per reported day
    pub ticks_per_day: usize,

    /// Optional hard cap on dispatched balls
    ///
    /// `None` runs to completion. A limit turns a non-terminating logic
    /// defect into `SimulationError::TickLimitExceeded` instead of a hang.
    pub max_ticks: Option<usize>,

    /// Record per-tick events to the engine's `EventLog`
    ///
    /// Off by default: a full 127-ball run dispatches millions of balls,
    /// and callers that only want the day count should not hold that
    /// history in memory.
    pub record_events: bool,
}

impl ClockConfig {
    /// Standard configuration for a given ball count: 1440-tick days,
    /// no tick cap
    pub fn new(num_balls: usize) -> Self {
        Self {
            num_balls,
            ticks_per_day: TICKS_PER_DAY,
            max_ticks: None,
            record_events: false,
        }
    }

    /// Same configuration with a tick cap applied
    pub fn with_max_ticks(mut self, max_ticks: usize) -> Self {
        self.max_ticks = Some(max_ticks);
        self
    }

    /// Same configuration with event recording enabled
    pub fn with_event_recording(mut self) -> Self {
        self.record_events = true;
        self
    }
}

// ============================================================================
// Results & Errors
// ============================================================================

/// Engine lifecycle state
///
/// `Initial` exists so the order check is skipped on the very first step:
/// the rack starts in its original order, and checking before any ball has
/// moved would terminate at tick 0 with a useless answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No ball dispatched yet; order check suppressed
    Initial,
    /// Dispatching balls
    Running,
    /// Cycle detected; the engine will not dispatch again
    Terminated,
}

/// Diagnostics for a single executed tick
///
/// The occupancy counters mirror track state after the step. They are
/// bookkeeping only; no control decision reads them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickResult {
    /// Tick number of this step (1-based; tick 0 is the untouched rack)
    pub tick: usize,

    /// The ball dispatched from the front of the main queue
    pub dispatched: Ball,

    /// Minute track occupancy after the step
    pub minute_count: usize,

    /// Five-minute track occupancy after the step
    pub five_minute_count: usize,

    /// Hour track occupancy after the step
    pub hour_count: usize,
}

/// Outcome of asking the engine for one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// A ball was dispatched and absorbed; the run continues
    Advanced(TickResult),

    /// The queue matched its original order; the run is over
    CycleComplete(CycleReport),
}

/// Final answer for a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleReport {
    /// Number of balls simulated
    pub num_balls: usize,

    /// Balls dispatched until the original order reappeared
    pub total_ticks: usize,

    /// Elapsed days, `total_ticks / ticks_per_day` floor division
    pub days: usize,
}

/// Simulation error types
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SimulationError {
    /// Configuration validation error
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// The configured tick cap was reached without cycle detection
    #[error("Tick limit of {limit} reached without the rack returning to its original order")]
    TickLimitExceeded { limit: usize },

    /// An internal invariant was violated; indicates a defect
    #[error("State corrupted: {0}")]
    StateCorrupted(String),

    /// Snapshot failed structural validation
    #[error("State validation failed: {0}")]
    StateValidation(String),

    /// Snapshot belongs to a different configuration
    #[error("Config hash mismatch: snapshot has {snapshot}, expected {expected}")]
    ConfigMismatch { snapshot: String, expected: String },

    /// Serialization failure while hashing or saving state
    #[error("Serialization error: {0}")]
    Serialization(String),
}

// ============================================================================
// Engine
// ============================================================================

/// The clock engine: owns all state and drives the tick loop
///
/// # Determinism
///
/// The engine holds the only mutable references to the queue and tracks,
/// and each tick runs the full chain synchronously before the next begins.
/// Two engines built from the same config produce identical tick counts,
/// day counts, and event logs.
#[derive(Debug)]
pub struct ClockEngine {
    /// Configuration this engine was built from
    config: ClockConfig,

    /// Main queue and tracks
    state: ClockState,

    /// Time management
    time: TimeManager,

    /// Lifecycle state machine
    engine_state: EngineState,

    /// Complete simulation history
    event_log: EventLog,
}

impl ClockEngine {
    /// Create a new engine with the identity rack (balls 0..N-1 in order)
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` when `ticks_per_day` is zero or when
    /// `num_balls` does not exceed the combined track capacity (26):
    /// below that, a full main queue no longer implies that every ball is
    /// at rest, and the termination check would be unsound.
    ///
    /// # Example
    ///
    /// ```
    /// use ball_clock_core::{ClockConfig, ClockEngine};
    ///
    /// assert!(ClockEngine::new(ClockConfig::new(27)).is_ok());
    /// assert!(ClockEngine::new(ClockConfig::new(26)).is_err());
    /// ```
    pub fn new(config: ClockConfig) -> Result<Self, SimulationError> {
        Self::validate_config(&config)?;

        let state = ClockState::new(identity_rack(config.num_balls));
        let time = TimeManager::new(config.ticks_per_day);
        debug!(num_balls = config.num_balls, "clock engine initialized");

        Ok(Self {
            config,
            state,
            time,
            engine_state: EngineState::Initial,
            event_log: EventLog::new(),
        })
    }

    /// Reassemble an engine from restored parts (checkpoint restore)
    pub(crate) fn from_parts(config: ClockConfig, state: ClockState, time: TimeManager) -> Self {
        let engine_state = if time.current_tick() == 0 {
            EngineState::Initial
        } else {
            EngineState::Running
        };
        Self {
            config,
            state,
            time,
            engine_state,
            event_log: EventLog::new(),
        }
    }

    fn validate_config(config: &ClockConfig) -> Result<(), SimulationError> {
        if config.ticks_per_day == 0 {
            return Err(SimulationError::InvalidConfig(
                "ticks_per_day must be > 0".to_string(),
            ));
        }

        if config.num_balls <= TOTAL_TRACK_CAPACITY {
            return Err(SimulationError::InvalidConfig(format!(
                "num_balls must exceed the combined track capacity of {}, got {}",
                TOTAL_TRACK_CAPACITY, config.num_balls
            )));
        }

        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Configuration this engine was built from
    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// Current queue and track state
    pub fn state(&self) -> &ClockState {
        &self.state
    }

    /// Lifecycle state
    pub fn engine_state(&self) -> EngineState {
        self.engine_state
    }

    /// Total balls dispatched so far
    pub fn current_tick(&self) -> usize {
        self.time.current_tick()
    }

    /// Elapsed whole days
    pub fn elapsed_days(&self) -> usize {
        self.time.elapsed_days()
    }

    /// Reference to the event log
    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Total events logged
    pub fn event_count(&self) -> usize {
        self.event_log.len()
    }

    fn report(&self) -> CycleReport {
        CycleReport {
            num_balls: self.config.num_balls,
            total_ticks: self.time.current_tick(),
            days: self.time.elapsed_days(),
        }
    }

    // ========================================================================
    // Tick Loop
    // ========================================================================

    /// Execute one step
    ///
    /// Checks for termination first (except on the very first step), then
    /// dispatches the front ball through the track chain. Once the cycle
    /// has been detected, further calls keep returning the same
    /// `CycleComplete` report without dispatching.
    ///
    /// # Errors
    ///
    /// * `TickLimitExceeded` - the configured `max_ticks` cap was reached
    /// * `StateCorrupted` - an internal invariant was violated (defect)
    pub fn tick(&mut self) -> Result<TickOutcome, SimulationError> {
        match self.engine_state {
            EngineState::Terminated => {
                return Ok(TickOutcome::CycleComplete(self.report()));
            }
            EngineState::Running => {
                if self.state.all_home() && self.state.is_in_original_order() {
                    self.engine_state = EngineState::Terminated;
                    let report = self.report();
                    if self.config.record_events {
                        self.event_log.log(Event::CycleDetected {
                            tick: report.total_ticks,
                            days: report.days,
                        });
                    }
                    debug!(
                        num_balls = report.num_balls,
                        total_ticks = report.total_ticks,
                        days = report.days,
                        "cycle detected"
                    );
                    return Ok(TickOutcome::CycleComplete(report));
                }
            }
            // The rack trivially matches before any ball has moved; the
            // order check must not fire at tick 0.
            EngineState::Initial => {
                self.engine_state = EngineState::Running;
            }
        }

        if let Some(limit) = self.config.max_ticks {
            if self.time.current_tick() >= limit {
                return Err(SimulationError::TickLimitExceeded { limit });
            }
        }

        let ball = self.state.pop_next_ball().ok_or_else(|| {
            SimulationError::StateCorrupted("main queue empty with no cycle detected".to_string())
        })?;

        self.time.advance_tick();
        let tick = self.time.current_tick();
        if self.config.record_events {
            self.event_log.log(Event::BallDispatched { tick, ball });
        }

        // Route the ball through the chain until a track absorbs it. The
        // hour track never forwards, so the loop always ends.
        let mut kind = TrackKind::Minute;
        let mut in_transit = ball;
        loop {
            match self.state.track_mut(kind).receive(in_transit) {
                TrackOutcome::Held => break,
                TrackOutcome::Flushed {
                    returned,
                    forwarded,
                } => {
                    let returned_count = returned.len();
                    self.state.return_balls(returned);
                    if self.config.record_events {
                        self.event_log.log(Event::TrackFlushed {
                            tick,
                            track: kind,
                            returned: returned_count,
                            forwarded: forwarded.is_some(),
                        });
                    }
                    trace!(?kind, tick, returned_count, "track flushed");

                    match forwarded {
                        Some(next_ball) => {
                            kind = kind.next().ok_or_else(|| {
                                SimulationError::StateCorrupted(
                                    "terminal track forwarded a ball".to_string(),
                                )
                            })?;
                            in_transit = next_ball;
                        }
                        None => break,
                    }
                }
            }
        }

        Ok(TickOutcome::Advanced(TickResult {
            tick,
            dispatched: ball,
            minute_count: self.state.track(TrackKind::Minute).len(),
            five_minute_count: self.state.track(TrackKind::FiveMinute).len(),
            hour_count: self.state.track(TrackKind::Hour).len(),
        }))
    }

    /// Step until the cycle is detected
    ///
    /// # Errors
    ///
    /// Propagates any `tick()` error; with `max_ticks` unset and a correct
    /// mechanism this always returns `Ok`.
    pub fn run(&mut self) -> Result<CycleReport, SimulationError> {
        loop {
            if let TickOutcome::CycleComplete(report) = self.tick()? {
                return Ok(report);
            }
        }
    }
}

/// Compute how many days until a rack of `num_balls` returns to its
/// original order
///
/// Pure: the same ball count always produces the same report.
///
/// # Example
///
/// ```
/// use ball_clock_core::compute_cycle;
///
/// let report = compute_cycle(30).unwrap();
/// assert_eq!(report.days, 15);
/// ```
pub fn compute_cycle(num_balls: usize) -> Result<CycleReport, SimulationError> {
    ClockEngine::new(ClockConfig::new(num_balls))?.run()
}
