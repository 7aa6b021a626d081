//! Shared application state injected into handlers and middleware.

use std::sync::Arc;

use crate::api::middleware::rate_limit::ClientRateLimiter;
use crate::application::services::LinkService;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub rate_limiter: Arc<ClientRateLimiter>,
}

impl AppState {
    pub fn new(link_service: Arc<LinkService>, rate_limiter: Arc<ClientRateLimiter>) -> Self {
        Self {
            link_service,
            rate_limiter,
        }
    }
}
