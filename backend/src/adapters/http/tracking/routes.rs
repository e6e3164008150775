use axum::routing::{delete, get};
use axum::Router;

use super::handlers::{
    delete_weight, delete_workout, get_workout, list_weights, list_workouts, log_weight,
    log_workout, weight_summary, workout_stats,
};
use crate::adapters::http::state::AppState;

/// Weight and workout routes. Static segments win over `:id`.
pub fn tracking_routes() -> Router<AppState> {
    Router::new()
        .route("/weights", get(list_weights).post(log_weight))
        .route("/weights/summary", get(weight_summary))
        .route("/weights/:id", delete(delete_weight))
        .route("/workouts", get(list_workouts).post(log_workout))
        .route("/workouts/stats", get(workout_stats))
        .route("/workouts/:id", get(get_workout).delete(delete_workout))
}
