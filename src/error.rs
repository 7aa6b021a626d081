//! Application error type shared by repositories, services and HTTP handlers.
//!
//! Every error rendered to a client has the shape `{"detail": "<message>"}`.
//! Server-side failures are logged with their cause and answered with a
//! generic message so storage internals never leak into responses.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// JSON body returned for every non-2xx response produced by the service.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No mapping exists for the requested short id.
    #[error("{0}")]
    NotFound(String),

    /// The mapping exists but its expiration date has passed.
    #[error("{0}")]
    Expired(String),

    /// The client exhausted its shorten quota.
    #[error("Rate limit exceeded: {limit} per 1 minute")]
    RateLimited { limit: u32, retry_after_secs: u64 },

    /// Primary-key collision on insert. Retryable with a fresh id.
    #[error("Short id already taken: {0}")]
    Conflict(String),

    /// The id generator hit its attempt cap without finding a free id.
    #[error("Unable to allocate a unique short id after {attempts} attempts")]
    CapacityExhausted { attempts: usize },

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn expired(message: impl Into<String>) -> Self {
        Self::Expired(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true for storage failures worth retrying as-is
    /// (pool exhaustion, I/O hiccups, a busy SQLite file).
    pub fn is_transient(&self) -> bool {
        match self {
            AppError::Database(sqlx::Error::PoolTimedOut | sqlx::Error::Io(_)) => true,
            AppError::Database(sqlx::Error::Database(db)) => {
                matches!(db.code().as_deref(), Some("5" | "6"))
            }
            _ => false,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Expired(_) => StatusCode::GONE,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::CapacityExhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Conflict(_) | AppError::Database(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::Conflict(
                db.constraint()
                    .map(str::to_string)
                    .unwrap_or_else(|| "mappings.id".to_string()),
            );
        }

        AppError::Database(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let detail = match &self {
            AppError::Conflict(_) | AppError::Database(_) | AppError::Internal(_) => {
                tracing::error!(error = %self, "Request failed with a server error");
                "Internal server error".to_string()
            }
            AppError::CapacityExhausted { .. } => {
                tracing::error!(error = %self, "Short id space exhausted");
                "Unable to allocate a short URL, try again later".to_string()
            }
            other => other.to_string(),
        };

        let mut response = (status, Json(ErrorBody { detail })).into_response();

        if let AppError::RateLimited {
            retry_after_secs, ..
        } = self
            && let Ok(value) = HeaderValue::from_str(&retry_after_secs.to_string())
        {
            response.headers_mut().insert(header::RETRY_AFTER, value);
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::not_found("x").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(AppError::expired("x").status_code(), StatusCode::GONE);
        assert_eq!(
            AppError::RateLimited {
                limit: 5,
                retry_after_secs: 12
            }
            .status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            AppError::CapacityExhausted { attempts: 10 }.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::internal("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_rate_limited_sets_retry_after() {
        let response = AppError::RateLimited {
            limit: 5,
            retry_after_secs: 12,
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "12");
    }

    #[test]
    fn test_transient_classification() {
        assert!(AppError::Database(sqlx::Error::PoolTimedOut).is_transient());
        assert!(!AppError::Database(sqlx::Error::RowNotFound).is_transient());
        assert!(!AppError::Conflict("mappings.id".to_string()).is_transient());
        assert!(!AppError::not_found("x").is_transient());
    }

    #[test]
    fn test_rate_limited_message() {
        let err = AppError::RateLimited {
            limit: 5,
            retry_after_secs: 1,
        };
        assert_eq!(err.to_string(), "Rate limit exceeded: 5 per 1 minute");
    }
}
