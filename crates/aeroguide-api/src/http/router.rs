//! Axum router configuration with middleware.
//!
//! All feature routes are under `/api/`. Middleware: CORS (the browser
//! client is served from a different origin in development) and tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/ask", post(handlers::ask::ask))
        .route("/convert", post(handlers::convert::convert))
        .route("/playlist", post(handlers::playlist::playlist))
        .route("/summarize", post(handlers::text::summarize))
        .route("/translate", post(handlers::text::translate))
        .route("/reading-time", post(handlers::text::reading_time));

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
