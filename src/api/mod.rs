//! HTTP API module
//!
//! A thin control surface over the plan, the timer and the saved workouts.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/plan", get(plan_handler).delete(clear_plan_handler))
        .route("/plan/exercises", post(add_exercise_handler))
        .route(
            "/plan/exercises/:index",
            put(edit_exercise_handler).delete(remove_exercise_handler),
        )
        .route("/plan/exercises/:index/up", post(move_up_handler))
        .route("/plan/exercises/:index/down", post(move_down_handler))
        .route("/timer/start", post(start_handler))
        .route("/timer/pause", post(pause_handler))
        .route("/timer/reset", post(reset_handler))
        .route("/workouts", get(workouts_handler).post(save_workout_handler))
        .route("/workouts/:title", delete(delete_workout_handler))
        .route("/workouts/:title/load", post(load_workout_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
