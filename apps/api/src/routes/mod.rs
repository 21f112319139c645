pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::feedback::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Feedback API
        .route(
            "/api/v1/interviews/feedback",
            post(handlers::handle_generate_feedback),
        )
        .route("/api/v1/feedback/normalize", post(handlers::handle_normalize))
        .with_state(state)
}
