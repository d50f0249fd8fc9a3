//! Core infrastructure: time management

pub mod time;

pub use time::{TimeManager, TICKS_PER_DAY};
