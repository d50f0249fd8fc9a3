//! Checkpoint - save/load clock state
//!
//! Serializes the complete engine position (tick counter, queue order,
//! track contents) for pause/resume and for determinism testing: a run
//! restored from a snapshot must converge to the same report as the
//! uninterrupted run.
//!
//! # Critical Invariants
//!
//! - **Conservation**: a snapshot accounts for every ball exactly once
//! - **Capacity**: no saved track exceeds its capacity
//! - **Config matching**: a snapshot can only be restored with the
//!   configuration it was taken under (SHA-256 hash check)

use crate::core::time::TimeManager;
use crate::models::ball::Ball;
use crate::models::state::ClockState;
use crate::models::track::{Track, TrackKind};
use crate::orchestrator::engine::{ClockConfig, ClockEngine, SimulationError};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::VecDeque;

// ============================================================================
// Snapshot Structure
// ============================================================================

/// Complete engine position at a step boundary
///
/// Balls are stored as their original positions; queue and track vectors
/// preserve order (queue front first, tracks in arrival order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Tick counter at the time of the snapshot
    pub current_tick: usize,

    /// Main queue contents, front first
    pub main_queue: Vec<usize>,

    /// Minute track contents, arrival order
    pub minute_track: Vec<usize>,

    /// Five-minute track contents, arrival order
    pub five_minute_track: Vec<usize>,

    /// Hour track contents, arrival order
    pub hour_track: Vec<usize>,

    /// SHA-256 hash of the originating config (verified on restore)
    pub config_hash: String,
}

// ============================================================================
// Config Hashing
// ============================================================================

/// Compute a deterministic SHA-256 hash of a config
///
/// Hashes the JSON serialization. Struct fields serialize in declaration
/// order, so equal configs always hash equal.
pub fn compute_config_hash<T: Serialize>(config: &T) -> Result<String, SimulationError> {
    let json = serde_json::to_string(config).map_err(|e| {
        SimulationError::Serialization(format!("config serialization failed: {}", e))
    })?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

// ============================================================================
// Validation
// ============================================================================

/// Validate snapshot integrity against a configuration
///
/// Checks:
/// - no track exceeds its capacity
/// - queue plus tracks hold exactly `num_balls` balls
/// - every original position 0..num_balls appears exactly once
pub fn validate_snapshot(
    snapshot: &StateSnapshot,
    config: &ClockConfig,
) -> Result<(), SimulationError> {
    let tracks = [
        (TrackKind::Minute, &snapshot.minute_track),
        (TrackKind::FiveMinute, &snapshot.five_minute_track),
        (TrackKind::Hour, &snapshot.hour_track),
    ];

    for (kind, held) in &tracks {
        if held.len() > kind.capacity() {
            return Err(SimulationError::StateValidation(format!(
                "{:?} track holds {} balls, capacity is {}",
                kind,
                held.len(),
                kind.capacity()
            )));
        }
    }

    let total = snapshot.main_queue.len()
        + snapshot.minute_track.len()
        + snapshot.five_minute_track.len()
        + snapshot.hour_track.len();
    if total != config.num_balls {
        return Err(SimulationError::StateValidation(format!(
            "ball conservation violated: snapshot accounts for {} balls, expected {}",
            total, config.num_balls
        )));
    }

    let mut positions: Vec<usize> = snapshot
        .main_queue
        .iter()
        .chain(tracks.iter().flat_map(|(_, held)| held.iter()))
        .copied()
        .collect();
    positions.sort_unstable();
    for (expected, position) in positions.iter().enumerate() {
        if *position != expected {
            return Err(SimulationError::StateValidation(format!(
                "ball positions are not a permutation of 0..{}: saw {}",
                config.num_balls, position
            )));
        }
    }

    Ok(())
}

// ============================================================================
// Engine Save / Restore
// ============================================================================

impl ClockEngine {
    /// Capture the engine position as a snapshot
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if config hashing fails.
    pub fn snapshot(&self) -> Result<StateSnapshot, SimulationError> {
        let positions = |balls: &[Ball]| -> Vec<usize> {
            balls.iter().map(|b| b.original_position()).collect()
        };

        Ok(StateSnapshot {
            current_tick: self.current_tick(),
            main_queue: self
                .state()
                .main_queue()
                .iter()
                .map(|b| b.original_position())
                .collect(),
            minute_track: positions(self.state().track(TrackKind::Minute).held()),
            five_minute_track: positions(self.state().track(TrackKind::FiveMinute).held()),
            hour_track: positions(self.state().track(TrackKind::Hour).held()),
            config_hash: compute_config_hash(self.config())?,
        })
    }

    /// Rebuild an engine from a snapshot
    ///
    /// The lifecycle state is derived from the tick counter: a tick-0
    /// snapshot restores as `Initial` (the first-step check suppression
    /// survives a save/restore), anything later restores as `Running`.
    /// The event log starts empty; history before the snapshot is not
    /// carried.
    ///
    /// # Errors
    ///
    /// * `ConfigMismatch` - the snapshot was taken under a different config
    /// * `StateValidation` - the snapshot violates conservation or capacity
    pub fn from_snapshot(
        config: ClockConfig,
        snapshot: &StateSnapshot,
    ) -> Result<Self, SimulationError> {
        let expected = compute_config_hash(&config)?;
        if snapshot.config_hash != expected {
            return Err(SimulationError::ConfigMismatch {
                snapshot: snapshot.config_hash.clone(),
                expected,
            });
        }

        validate_snapshot(snapshot, &config)?;

        let balls = |saved: &[usize]| -> Vec<Ball> { saved.iter().copied().map(Ball::new).collect() };
        let track = |kind: TrackKind, saved: &[usize]| -> Result<Track, SimulationError> {
            Track::from_held(kind, balls(saved))
                .map_err(|e| SimulationError::StateValidation(e.to_string()))
        };

        let main_queue: VecDeque<Ball> = snapshot.main_queue.iter().copied().map(Ball::new).collect();
        let state = ClockState::from_parts(
            main_queue,
            track(TrackKind::Minute, &snapshot.minute_track)?,
            track(TrackKind::FiveMinute, &snapshot.five_minute_track)?,
            track(TrackKind::Hour, &snapshot.hour_track)?,
            config.num_balls,
        );
        let time = TimeManager::at_tick(config.ticks_per_day, snapshot.current_tick);

        Ok(ClockEngine::from_parts(config, state, time))
    }
}
