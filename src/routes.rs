//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorten`    - Create a short URL (rate limited per client)
//! - `GET  /health`     - Health check
//! - `GET  /{short_id}` - Short URL redirect
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-client token bucket on `/shorten` only
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with all routes and per-route middleware.
///
/// `/health` is registered before the catch-all id route so it is never
/// treated as a short id.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/{short_id}", get(redirect_handler))
        .merge(api::routes::shorten_routes(&state))
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application service with trailing slashes trimmed from
/// request paths before routing.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state))
}
