//! # URL Shortener
//!
//! A small URL shortening service built with Axum and SQLite.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Mapping entity, repository and validator traits
//! - **Application Layer** ([`application`]) - Shorten and redirect orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite storage and HTTP URL checks
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Only publicly reachable `http`/`https` URLs are accepted
//! - Collision-checked random short ids
//! - Mappings expire after a fixed lifetime (`410 Gone` afterwards)
//! - Per-client rate limiting on link creation
//!
//! ## Quick Start
//!
//! ```bash
//! export DATABASE_URL="sqlite://urls.db?mode=rwc"
//! cargo run
//!
//! curl -X POST localhost:8000/shorten \
//!      -H 'content-type: application/json' \
//!      -d '{"original_url": "https://www.rust-lang.org"}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::api::middleware::rate_limit::ClientRateLimiter;
    pub use crate::application::services::{LinkService, LinkSettings, ShortenOutcome};
    pub use crate::domain::entities::Mapping;
    pub use crate::domain::repositories::MappingRepository;
    pub use crate::domain::url_validator::{UrlRejection, UrlValidator};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
