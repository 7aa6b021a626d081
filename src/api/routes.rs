//! API route configuration.

use crate::api::handlers::shorten_handler;
use crate::state::AppState;
use axum::{Router, routing::post};

/// Routes that create mappings, throttled per client address.
///
/// # Endpoints
///
/// - `POST /shorten` - Create a short URL
pub fn shorten_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route_layer(state.rate_limiter.layer())
}
