//! URL validator backed by a live HTTP fetch.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::net::IpAddr;
use std::time::Duration;
use tracing::{debug, instrument};
use url::{Host, Url};

use crate::config::Config;
use crate::domain::url_validator::{UrlRejection, UrlValidator};
use crate::utils::public_address::{is_public_ip, is_reserved_hostname};
use crate::utils::url_format::{parse_http_url, within_length};

/// Validates URLs by length, syntax, a live `GET` and the address space of the host.
///
/// The fetch is asynchronous, so a slow target only holds up the request that
/// submitted it. When reachability checks are disabled the validator neither
/// fetches nor resolves: host names are judged by name alone and IP literals
/// by their range.
pub struct HttpUrlValidator {
    client: Client,
    max_url_length: usize,
    verify_reachability: bool,
}

impl HttpUrlValidator {
    /// Creates a validator whose fetches give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(
        timeout: Duration,
        max_url_length: usize,
        verify_reachability: bool,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("url-shortener/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            max_url_length,
            verify_reachability,
        })
    }

    /// Builds a validator from the service configuration.
    ///
    /// # Errors
    ///
    /// See [`HttpUrlValidator::new`].
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Self::new(
            Duration::from_secs(config.validator_timeout_secs),
            config.max_url_length,
            config.verify_reachability,
        )
    }

    async fn check_reachable(&self, url: &Url) -> Result<(), UrlRejection> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| UrlRejection::FetchFailed(e.to_string()))?;

        if response.status() != StatusCode::OK {
            debug!(status = %response.status(), "Target answered with a non-200 status");
            return Err(UrlRejection::NotReachable);
        }

        Ok(())
    }

    async fn check_public(&self, url: &Url) -> Result<(), UrlRejection> {
        match url.host() {
            Some(Host::Ipv4(ip)) => ensure_public(IpAddr::V4(ip)),
            Some(Host::Ipv6(ip)) => ensure_public(IpAddr::V6(ip)),
            Some(Host::Domain(domain)) => {
                if is_reserved_hostname(domain) {
                    return Err(UrlRejection::NotPublic);
                }
                if self.verify_reachability {
                    let port = url.port_or_known_default().unwrap_or(80);
                    let addrs = tokio::net::lookup_host((domain, port))
                        .await
                        .map_err(|_| UrlRejection::NotReachable)?;

                    for addr in addrs {
                        ensure_public(addr.ip())?;
                    }
                }
                Ok(())
            }
            None => Err(UrlRejection::InvalidFormat),
        }
    }
}

fn ensure_public(ip: IpAddr) -> Result<(), UrlRejection> {
    if is_public_ip(ip) {
        Ok(())
    } else {
        Err(UrlRejection::NotPublic)
    }
}

#[async_trait]
impl UrlValidator for HttpUrlValidator {
    #[instrument(skip(self), fields(len = url.len()))]
    async fn validate(&self, url: &str) -> Result<(), UrlRejection> {
        if !within_length(url, self.max_url_length) {
            return Err(UrlRejection::TooLong);
        }

        let parsed = parse_http_url(url)?;

        if self.verify_reachability {
            self.check_reachable(&parsed).await?;
        }

        self.check_public(&parsed).await
    }
}
