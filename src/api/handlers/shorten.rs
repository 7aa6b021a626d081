//! Handler for link shortening endpoint.

use axum::{Json, extract::State};

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL for a long one.
///
/// # Endpoint
///
/// `POST /shorten` (rate limited per client address)
///
/// # Request Body
///
/// ```json
/// { "original_url": "https://example.com/page" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "short_url": "http://localhost:8000/3f2a9c1e",
///   "expiration_date": "2025-02-01T12:00:00Z",
///   "success": true
/// }
/// ```
///
/// A refused URL also yields `200 OK`:
///
/// ```json
/// { "success": false, "reason": "URL is not publicly accessible" }
/// ```
///
/// # Errors
///
/// Returns 500 on storage failures and 503 when no free short id could be found.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    let outcome = state.link_service.shorten(&payload.original_url).await?;

    Ok(Json(outcome.into()))
}
