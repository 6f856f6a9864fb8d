pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::layout::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Walls
        .route("/api/v1/walls", post(handlers::handle_create_wall))
        .route("/api/v1/walls/:id", get(handlers::handle_get_wall))
        .route("/api/v1/walls/:id/svg", get(handlers::handle_get_wall_svg))
        .route(
            "/api/v1/walls/:id/search",
            post(handlers::handle_search_wall),
        )
        // Ad-hoc grid search
        .route("/api/v1/search", post(handlers::handle_search_grid))
        .with_state(state)
}
