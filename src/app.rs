use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/summary", get(handlers::get_summary))
        .route(
            "/api/meals",
            get(handlers::list_meals).post(handlers::submit_meal),
        )
        .route("/api/meals/:id", delete(handlers::delete_meal))
        .route(
            "/api/workouts",
            get(handlers::list_workouts).post(handlers::submit_workout),
        )
        .route("/api/workouts/:id", delete(handlers::delete_workout))
        .route("/api/limit", put(handlers::set_limit))
        .route("/api/reset", post(handlers::reset))
        .with_state(state)
}
