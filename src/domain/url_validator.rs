//! Contract for deciding whether a submitted URL may be shortened.

use async_trait::async_trait;

/// Why a URL was refused. The `Display` text is the `reason` returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlRejection {
    #[error("URL too long")]
    TooLong,

    #[error("Invalid URL format")]
    InvalidFormat,

    #[error("URL not reachable")]
    NotReachable,

    #[error("Error reaching URL: {0}")]
    FetchFailed(String),

    #[error("URL is not publicly accessible")]
    NotPublic,
}

/// Checks that a URL is well-formed, reachable and public.
///
/// Checks run in a fixed order and stop at the first failure:
/// length, syntax, live fetch, public address space.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlValidator: Send + Sync {
    async fn validate(&self, url: &str) -> Result<(), UrlRejection>;
}
