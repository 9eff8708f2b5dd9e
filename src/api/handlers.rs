//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    state::{AppState, WorkoutError},
    timer::StartOutcome,
};
use super::responses::{
    exercise_views, ApiResponse, ExerciseRequest, HealthResponse, SaveWorkoutRequest,
    StatusResponse, WorkoutsResponse,
};

pub type ApiResult = Result<Json<ApiResponse>, (StatusCode, Json<ApiResponse>)>;

fn status_for(error: &WorkoutError) -> StatusCode {
    match error {
        WorkoutError::Validation(_) => StatusCode::BAD_REQUEST,
        WorkoutError::Index { .. } | WorkoutError::NotFound(_) => StatusCode::NOT_FOUND,
        WorkoutError::Storage(_) | WorkoutError::Unavailable(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Wrap an outcome with the current timer and plan, so every reply carries
/// what the list and display should show next
fn reply(state: &AppState, outcome: Result<String, WorkoutError>) -> ApiResult {
    let timer = state.timer_state().unwrap_or_default();
    let plan = state.plan().unwrap_or_default();

    match outcome {
        Ok(message) => {
            info!("{}", message);
            Ok(Json(ApiResponse::ok(message, timer, &plan)))
        }
        Err(e) => {
            let status = status_for(&e);
            if status.is_server_error() {
                error!("Request failed: {}", e);
            } else {
                warn!("Request rejected: {}", e);
            }
            Err((status, Json(ApiResponse::error(e.to_string(), timer, &plan))))
        }
    }
}

/// Handle GET /plan - Return the active plan
pub async fn plan_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    let outcome = state.plan().map(|plan| format!("{} exercises", plan.len()));
    reply(&state, outcome)
}

/// Handle DELETE /plan - Remove every exercise
pub async fn clear_plan_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    let outcome = state.clear_plan().map(|()| "Plan cleared".to_string());
    reply(&state, outcome)
}

/// Handle POST /plan/exercises - Append an exercise
pub async fn add_exercise_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ExerciseRequest>,
) -> ApiResult {
    let outcome = state
        .add_exercise(&request.name, request.duration)
        .map(|index| format!("Added {:?} at position {}", request.name.trim(), index));
    reply(&state, outcome)
}

/// Handle PUT /plan/exercises/:index - Replace an exercise in place
pub async fn edit_exercise_handler(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
    Json(request): Json<ExerciseRequest>,
) -> ApiResult {
    let outcome = state
        .edit_exercise(index, &request.name, request.duration)
        .map(|()| format!("Updated exercise {}", index));
    reply(&state, outcome)
}

/// Handle DELETE /plan/exercises/:index
pub async fn remove_exercise_handler(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> ApiResult {
    let outcome = state
        .remove_exercise(index)
        .map(|()| format!("Removed exercise {}", index));
    reply(&state, outcome)
}

/// Handle POST /plan/exercises/:index/up
pub async fn move_up_handler(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> ApiResult {
    let outcome = state
        .move_exercise_up(index)
        .map(|()| format!("Moved exercise {} up", index));
    reply(&state, outcome)
}

/// Handle POST /plan/exercises/:index/down
pub async fn move_down_handler(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> ApiResult {
    let outcome = state
        .move_exercise_down(index)
        .map(|()| format!("Moved exercise {} down", index));
    reply(&state, outcome)
}

/// Handle POST /timer/start - Start or resume the workout
pub async fn start_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    let outcome = state.start_timer().and_then(|outcome| match outcome {
        StartOutcome::Started(_) => Ok("Workout started".to_string()),
        StartOutcome::Resumed(_) => Ok("Workout resumed".to_string()),
        StartOutcome::AlreadyRunning => Ok("Timer already running".to_string()),
        StartOutcome::EmptyPlan => Err(WorkoutError::Validation(
            "Add at least one exercise before starting".to_string(),
        )),
        StartOutcome::AwaitingReset => Err(WorkoutError::Validation(
            "Workout finished, reset before starting again".to_string(),
        )),
    });
    reply(&state, outcome)
}

/// Handle POST /timer/pause
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    let outcome = state.pause_timer().map(|paused| {
        if paused {
            "Timer paused".to_string()
        } else {
            "Timer was not running".to_string()
        }
    });
    reply(&state, outcome)
}

/// Handle POST /timer/reset
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    let outcome = state.reset_timer().map(|()| "Timer reset".to_string());
    reply(&state, outcome)
}

/// Handle GET /workouts - List saved workout titles
pub async fn workouts_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<WorkoutsResponse>, StatusCode> {
    match state.workout_titles() {
        Ok(titles) => Ok(Json(WorkoutsResponse { titles })),
        Err(e) => {
            error!("Failed to list workouts: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /workouts - Save the active plan under a title
pub async fn save_workout_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SaveWorkoutRequest>,
) -> ApiResult {
    let outcome = state
        .save_workout(&request.title)
        .map(|()| format!("Saved workout {:?}", request.title.trim()));
    reply(&state, outcome)
}

/// Handle POST /workouts/:title/load - Make a saved workout the active plan
pub async fn load_workout_handler(
    State(state): State<Arc<AppState>>,
    Path(title): Path<String>,
) -> ApiResult {
    let outcome = state
        .load_workout(&title)
        .map(|plan| format!("Loaded workout {:?} ({} exercises)", title, plan.len()));
    reply(&state, outcome)
}

/// Handle DELETE /workouts/:title
pub async fn delete_workout_handler(
    State(state): State<Arc<AppState>>,
    Path(title): Path<String>,
) -> ApiResult {
    let outcome = state.delete_workout(&title).and_then(|deleted| {
        if deleted {
            Ok(format!("Deleted workout {:?}", title))
        } else {
            Err(WorkoutError::NotFound(format!("No saved workout named {:?}", title)))
        }
    });
    reply(&state, outcome)
}

/// Handle GET /status - Return timer, display and plan
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.timer_state() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let plan = match state.plan() {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to get plan: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let display = state.display();
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        clock: display.clock(),
        display,
        announcement: state.current_announcement(),
        exercises: exercise_views(&plan),
        total_seconds: plan.total_seconds(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
