//! Ball Clock Simulator - Core Engine
//!
//! Simulates a mechanical ball clock: a fixed rack of numbered balls is
//! routed, one per simulated minute, through a chain of bounded holding
//! tracks (minute, five-minute, hour). Balls overflowing the hour track
//! return to the main dispatch queue. The engine reports after how many
//! simulated days the balls return to their original relative order.
//!
//! # Architecture
//!
//! - **core**: Time management (ticks, 1440-tick days)
//! - **models**: Domain types (Ball, Track, ClockState, EventLog)
//! - **orchestrator**: Dispatch loop, termination check, checkpointing
//!
//! # Critical Invariants
//!
//! 1. Ball conservation: queue plus tracks always hold exactly N balls
//! 2. Deterministic execution: same ball count, same result, every run
//! 3. No track exceeds its capacity between ticks
//!
//! # Example
//!
//! ```
//! use ball_clock_core::compute_cycle;
//!
//! let report = compute_cycle(30).unwrap();
//! assert_eq!(report.days, 15);
//! ```

// Module declarations
pub mod core;
pub mod models;
pub mod orchestrator;

// Re-exports for convenience
pub use core::time::{TimeManager, TICKS_PER_DAY};
pub use models::{
    ball::Ball,
    event::{Event, EventLog},
    state::ClockState,
    track::{Track, TrackError, TrackKind, TrackOutcome},
};
pub use orchestrator::{
    compute_cycle, ClockConfig, ClockEngine, CycleReport, EngineState, SimulationError,
    StateSnapshot, TickOutcome, TickResult,
};
