pub mod fold;
pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::sessions::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Stateless computation
        .route("/api/v1/fold", get(fold::handle_fold))
        // Session API
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/increment",
            post(handlers::handle_increment),
        )
        .route(
            "/api/v1/sessions/:id/decrement",
            post(handlers::handle_decrement),
        )
        .route(
            "/api/v1/sessions/:id/parameters",
            put(handlers::handle_set_parameters),
        )
        .with_state(state)
}
