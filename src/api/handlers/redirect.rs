//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short id to its original URL.
///
/// # Endpoint
///
/// `GET /{short_id}`
///
/// Answers `307 Temporary Redirect` so clients keep the request method and
/// do not cache the hop permanently.
///
/// # Errors
///
/// Returns 404 Not Found if the id is unknown.
/// Returns 410 Gone if the mapping has expired.
pub async fn redirect_handler(
    Path(short_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let mapping = state.link_service.resolve(&short_id).await?;

    debug!(id = %mapping.id, "Redirecting");

    Ok(Redirect::temporary(&mapping.original_url))
}
