//! Interval Coach - an interval-workout timer
//!
//! This library provides an ordered workout plan, a countdown engine that
//! walks through it with audio and spoken cues, persistence for named plans
//! and a small HTTP control surface.

pub mod config;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod timer;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, Exercise, WorkoutError, WorkoutPlan};
pub use timer::{StartOutcome, TickOutcome, TickSource, TimerEngine, TimerSettings};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
