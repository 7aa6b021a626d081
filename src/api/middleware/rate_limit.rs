//! Per-client rate limiting for the shorten endpoint.
//!
//! Each client address gets a token bucket holding `N` tokens that refills
//! at `N` per minute, so a client may burst `N` requests and is then
//! throttled to one request every `60 / N` seconds.

use std::net::IpAddr;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use tokio::task::JoinHandle;
use tower_governor::{
    GovernorError, GovernorLayer,
    governor::{GovernorConfig, GovernorConfigBuilder},
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

use crate::config::Config;
use crate::error::AppError;

type ShortenGovernorConfig = GovernorConfig<ClientIpKeyExtractor, NoOpMiddleware<QuantaInstant>>;

/// Keys requests by client address.
///
/// Uses the socket peer address, or, behind a trusted reverse proxy,
/// `X-Forwarded-For` / `X-Real-IP` / `Forwarded` with the peer address as
/// fallback.
#[derive(Debug, Clone, Copy)]
pub struct ClientIpKeyExtractor {
    behind_proxy: bool,
}

impl ClientIpKeyExtractor {
    pub fn new(behind_proxy: bool) -> Self {
        Self { behind_proxy }
    }
}

impl KeyExtractor for ClientIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        if self.behind_proxy {
            SmartIpKeyExtractor.extract(req)
        } else {
            PeerIpKeyExtractor.extract(req)
        }
    }
}

/// Shared governor configuration for `POST /shorten`.
pub struct ClientRateLimiter {
    config: Arc<ShortenGovernorConfig>,
    per_minute: NonZeroU32,
}

impl ClientRateLimiter {
    /// # Errors
    ///
    /// Returns an error if governor rejects the quota.
    pub fn new(per_minute: NonZeroU32, behind_proxy: bool) -> anyhow::Result<Self> {
        let limit = per_minute.get();

        let config = GovernorConfigBuilder::default()
            .key_extractor(ClientIpKeyExtractor::new(behind_proxy))
            .period(Duration::from_secs(60) / limit)
            .burst_size(limit)
            .finish()
            .context("Invalid rate limit quota")?;

        Ok(Self {
            config: Arc::new(config),
            per_minute,
        })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let per_minute = NonZeroU32::new(config.rate_limit_per_minute)
            .context("RATE_LIMIT_PER_MINUTE must be greater than 0")?;

        Self::new(per_minute, config.behind_proxy)
    }

    pub fn per_minute(&self) -> u32 {
        self.per_minute.get()
    }

    /// Creates the tower layer; every layer shares the same buckets.
    ///
    /// # Usage
    ///
    /// ```rust,ignore
    /// Router::new()
    ///     .route("/shorten", post(shorten_handler))
    ///     .route_layer(state.rate_limiter.layer());
    /// ```
    pub fn layer(
        &self,
    ) -> GovernorLayer<ClientIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
        let limit = self.per_minute.get();
        GovernorLayer::new(self.config.clone())
            .error_handler(move |err| rejection_response(err, limit))
    }

    /// Drops buckets that have fully refilled.
    pub fn retain_recent(&self) {
        self.config.limiter().retain_recent();
    }

    /// Number of client buckets currently tracked.
    pub fn len(&self) -> usize {
        self.config.limiter().len()
    }

    pub fn is_empty(&self) -> bool {
        self.config.limiter().is_empty()
    }
}

/// Periodically evicts idle client buckets until the task is aborted.
pub fn spawn_cleanup(limiter: Arc<ClientRateLimiter>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.tick().await;

        loop {
            interval.tick().await;
            limiter.retain_recent();
            tracing::debug!(tracked = limiter.len(), "Rate limiter buckets pruned");
        }
    })
}

/// Renders governor rejections in the service's `{"detail": ...}` format.
fn rejection_response(err: GovernorError, limit: u32) -> Response {
    match err {
        GovernorError::TooManyRequests { wait_time, .. } => {
            tracing::warn!(limit, wait_time, "Rate limit exceeded");
            AppError::RateLimited {
                limit,
                retry_after_secs: wait_time.max(1),
            }
            .into_response()
        }
        GovernorError::UnableToExtractKey => {
            AppError::internal("Client address unavailable").into_response()
        }
        GovernorError::Other { msg, .. } => AppError::internal(
            msg.unwrap_or_else(|| "Rate limiter failure".to_string()),
        )
        .into_response(),
    }
}
