//! Orchestrator - the dispatch loop and checkpointing
//!
//! See `engine.rs` for the tick loop and `checkpoint.rs` for save/restore.

pub mod checkpoint;
pub mod engine;

// Re-export main types for convenience
pub use checkpoint::{compute_config_hash, validate_snapshot, StateSnapshot};
pub use engine::{
    compute_cycle, ClockConfig, ClockEngine, CycleReport, EngineState, SimulationError,
    TickOutcome, TickResult,
};
