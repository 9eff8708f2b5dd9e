//! Workout timer
//!
//! The [`TimerEngine`] is a synchronous state machine: callers hand it tick
//! sources and drive `tick` once per second. The tokio driver lives in
//! [`crate::tasks`]; tests drive it directly.

pub mod engine;
pub mod settings;

pub use engine::{StartOutcome, TickOutcome, TickSource, TimerEngine, WORKOUT_COMPLETE};
pub use settings::TimerSettings;
