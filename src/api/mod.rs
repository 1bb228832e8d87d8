pub mod error;
mod preview;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::AppState;
use error::ApiError;

pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/preview", post(preview::render_preview))
        .route("/statuses", get(preview::list_statuses))
        .route("/components", get(preview::list_components));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .merge(crate::ui::create_router())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn not_found() -> ApiError {
    ApiError::not_found("No such route")
}
