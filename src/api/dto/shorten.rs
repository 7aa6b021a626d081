//! DTOs for the shorten endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::services::ShortenOutcome;

/// Request body for `POST /shorten`.
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    pub original_url: String,
}

/// Response body for `POST /shorten`.
///
/// Refused URLs are still answered with `200 OK`: `success` is false and
/// `reason` says why.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,

    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<ShortenOutcome> for ShortenResponse {
    fn from(outcome: ShortenOutcome) -> Self {
        match outcome {
            ShortenOutcome::Created(link) => Self {
                short_url: Some(link.short_url),
                expiration_date: Some(link.expiration_date),
                success: true,
                reason: None,
            },
            ShortenOutcome::Rejected(rejection) => Self {
                short_url: None,
                expiration_date: None,
                success: false,
                reason: Some(rejection.to_string()),
            },
        }
    }
}
