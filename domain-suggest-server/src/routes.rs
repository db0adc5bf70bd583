//! Application routes.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

/// Build the application router.
///
/// Static asset serving and the SPA catch-all are handled by an external
/// collaborator in front of this service; only the JSON API lives here.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/domain-suggestions",
            post(handlers::domain_suggestions),
        )
        .route("/api/test", get(handlers::api_test))
        .route("/api/hello", get(handlers::hello))
        .with_state(state)
}
