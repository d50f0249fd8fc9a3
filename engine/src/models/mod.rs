//! Domain models for the ball clock simulator

pub mod ball;
pub mod event;
pub mod state;
pub mod track;

// Re-exports
pub use ball::Ball;
pub use event::{Event, EventLog};
pub use state::ClockState;
pub use track::{Track, TrackError, TrackKind, TrackOutcome};
