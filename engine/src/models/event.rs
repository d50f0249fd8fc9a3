//! Event logging for simulation replay and debugging.
//!
//! Every significant state change during a run is appended to the
//! `EventLog`: ball dispatches, track flushes, and cycle detection. The
//! log gives tests a way to assert on flush ordering without reaching into
//! track internals, and makes a misbehaving run explainable after the
//! fact.

use crate::models::ball::Ball;
use crate::models::track::TrackKind;

/// Simulation event capturing a state change.
///
/// All events carry the tick at which they occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A ball left the front of the main queue and entered the chain
    BallDispatched { tick: usize, ball: Ball },

    /// A track at capacity was tripped and emptied
    ///
    /// `returned` counts the balls appended to the main queue by this
    /// flush (capacity for minute/five-minute; capacity + 1 for the hour
    /// track, which ejects its tripping ball as well). `forwarded` is true
    /// when the tripping ball travelled on to the next track.
    TrackFlushed {
        tick: usize,
        track: TrackKind,
        returned: usize,
        forwarded: bool,
    },

    /// The main queue returned to its original order
    CycleDetected { tick: usize, days: usize },
}

impl Event {
    /// Tick at which this event occurred
    pub fn tick(&self) -> usize {
        match self {
            Event::BallDispatched { tick, .. }
            | Event::TrackFlushed { tick, .. }
            | Event::CycleDetected { tick, .. } => *tick,
        }
    }
}

/// Append-only log of simulation events
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Number of events logged
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if nothing has been logged
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All events in log order
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Events that occurred at the given tick, in log order
    pub fn events_at_tick(&self, tick: usize) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.tick() == tick)
    }
}
