//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    services::Announcement,
    state::{DisplayUpdate, Exercise, TimerState, WorkoutPlan},
};

/// Body of add/edit exercise requests
#[derive(Debug, Clone, Deserialize)]
pub struct ExerciseRequest {
    pub name: String,
    pub duration: u32,
}

/// Body of save workout requests
#[derive(Debug, Clone, Deserialize)]
pub struct SaveWorkoutRequest {
    pub title: String,
}

/// One row of the rendered exercise list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseView {
    pub index: usize,
    pub name: String,
    pub duration: u32,
    pub can_move_up: bool,
    pub can_move_down: bool,
}

/// Render the plan with the boundary affordances the list needs
pub fn exercise_views(plan: &WorkoutPlan) -> Vec<ExerciseView> {
    plan.iter()
        .enumerate()
        .map(|(index, Exercise { name, duration })| ExerciseView {
            index,
            name: name.clone(),
            duration: *duration,
            can_move_up: plan.can_move_up(index),
            can_move_down: plan.can_move_down(index),
        })
        .collect()
}

/// API response structure for every state-changing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerState,
    pub exercises: Vec<ExerciseView>,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: &str, message: String, timer: TimerState, plan: &WorkoutPlan) -> Self {
        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            timer,
            exercises: exercise_views(plan),
        }
    }

    pub fn ok(message: String, timer: TimerState, plan: &WorkoutPlan) -> Self {
        Self::new("ok", message, timer, plan)
    }

    pub fn error(message: String, timer: TimerState, plan: &WorkoutPlan) -> Self {
        Self::new("error", message, timer, plan)
    }
}

/// Status response with the live display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerState,
    pub display: DisplayUpdate,
    pub clock: String,
    pub announcement: Option<Announcement>,
    pub exercises: Vec<ExerciseView>,
    pub total_seconds: u64,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Saved workout titles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutsResponse {
    pub titles: Vec<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
