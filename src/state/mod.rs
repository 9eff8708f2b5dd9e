//! State management module
//! 
//! This module contains the workout plan, the timer snapshot types and the
//! shared application state.

pub mod app_state;
pub mod error;
pub mod plan;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use error::WorkoutError;
pub use plan::{Exercise, WorkoutPlan, MIN_EXERCISE_SECONDS};
pub use timer_state::{
    DisplayUpdate, Phase, ResumePhase, TimerState, FINISHED_LABEL, GET_READY_LABEL, READY_LABEL,
};
