//! Link shortening and redirect resolution service.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{info, instrument, warn};

use crate::config::Config;
use crate::domain::entities::Mapping;
use crate::domain::repositories::MappingRepository;
use crate::domain::url_validator::{UrlRejection, UrlValidator};
use crate::error::AppError;
use crate::utils::id_generator::generate_id;
use crate::utils::url_format::within_length;

/// Retries for transient store failures on a single insert.
const STORE_WRITE_RETRIES: usize = 3;

/// Tunables for link creation.
#[derive(Debug, Clone)]
pub struct LinkSettings {
    /// Prefix joined with `/{id}` to build the public short URL.
    pub base_url: String,
    /// Lifetime of a mapping, counted from creation.
    pub ttl: Duration,
    pub max_url_length: usize,
    pub id_length: usize,
    /// Cap on id draws (and on regenerate-after-conflict rounds).
    pub max_id_attempts: usize,
}

impl LinkSettings {
    /// # Errors
    ///
    /// Returns an error if `link_ttl_days` does not fit in a duration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let ttl = Duration::try_days(config.link_ttl_days).with_context(|| {
            format!("LINK_TTL_DAYS out of range: {}", config.link_ttl_days)
        })?;

        Ok(Self {
            base_url: config.base_url.clone(),
            ttl,
            max_url_length: config.max_url_length,
            id_length: config.short_id_length,
            max_id_attempts: config.id_max_attempts,
        })
    }
}

impl Default for LinkSettings {
    fn default() -> Self {
        let config = Config::default();
        Self {
            base_url: config.base_url,
            ttl: Duration::days(config.link_ttl_days),
            max_url_length: config.max_url_length,
            id_length: config.short_id_length,
            max_id_attempts: config.id_max_attempts,
        }
    }
}

/// A freshly created short link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub id: String,
    pub short_url: String,
    pub original_url: String,
    pub expiration_date: DateTime<Utc>,
}

/// Result of a shorten call that did not hit an infrastructure failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortenOutcome {
    Created(ShortLink),
    /// The URL was refused; nothing was written.
    Rejected(UrlRejection),
}

/// Service for creating and resolving short links.
///
/// Orchestrates the URL validator, id allocation and the mapping store.
/// Client input problems come back as [`ShortenOutcome::Rejected`]; only
/// store failures and id exhaustion surface as [`AppError`].
pub struct LinkService {
    repository: Arc<dyn MappingRepository>,
    validator: Arc<dyn UrlValidator>,
    settings: LinkSettings,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(
        repository: Arc<dyn MappingRepository>,
        validator: Arc<dyn UrlValidator>,
        settings: LinkSettings,
    ) -> Self {
        Self {
            repository,
            validator,
            settings,
        }
    }

    pub fn settings(&self) -> &LinkSettings {
        &self.settings
    }

    /// Shortens `original_url`, stamping the mapping with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CapacityExhausted`] if no free id was found within
    /// the attempt cap, and storage errors that survived the write retries.
    pub async fn shorten(&self, original_url: &str) -> Result<ShortenOutcome, AppError> {
        self.shorten_at(original_url, Utc::now()).await
    }

    /// Shortens `original_url` as if called at `now`.
    ///
    /// Steps: length bound, validator, id allocation, insert. The length bound
    /// is checked here first so oversized input never reaches the validator or
    /// the store.
    ///
    /// # Errors
    ///
    /// See [`Self::shorten`].
    #[instrument(skip(self, original_url), fields(url_len = original_url.len()))]
    pub async fn shorten_at(
        &self,
        original_url: &str,
        now: DateTime<Utc>,
    ) -> Result<ShortenOutcome, AppError> {
        if !within_length(original_url, self.settings.max_url_length) {
            info!("Rejected URL over the length bound");
            return Ok(ShortenOutcome::Rejected(UrlRejection::TooLong));
        }

        if let Err(rejection) = self.validator.validate(original_url).await {
            info!(reason = %rejection, "Rejected URL");
            return Ok(ShortenOutcome::Rejected(rejection));
        }

        let mapping = self.persist(original_url, now).await?;
        info!(id = %mapping.id, "Created short link");

        Ok(ShortenOutcome::Created(ShortLink {
            short_url: self.short_url(&mapping.id),
            id: mapping.id,
            original_url: mapping.original_url,
            expiration_date: mapping.expiration_date,
        }))
    }

    /// Resolves a short id to its mapping at the current time.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown ids, [`AppError::Expired`] for
    /// mappings past their expiration date, and storage errors.
    pub async fn resolve(&self, id: &str) -> Result<Mapping, AppError> {
        self.resolve_at(id, Utc::now()).await
    }

    /// Resolves a short id as if called at `now`.
    ///
    /// # Errors
    ///
    /// See [`Self::resolve`].
    #[instrument(skip(self))]
    pub async fn resolve_at(&self, id: &str, now: DateTime<Utc>) -> Result<Mapping, AppError> {
        let mapping = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Short URL not found"))?;

        if mapping.is_expired_at(now) {
            return Err(AppError::expired("Short URL expired"));
        }

        Ok(mapping)
    }

    /// Draws random ids until one is absent from the store.
    ///
    /// The check alone does not reserve the id; [`MappingRepository::insert`]
    /// is the arbiter when two callers race.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CapacityExhausted`] after `max_id_attempts` taken ids.
    pub async fn generate_unique_id(&self) -> Result<String, AppError> {
        for attempt in 1..=self.settings.max_id_attempts {
            if let Some(id) = self.draw_free_id(attempt).await? {
                return Ok(id);
            }
        }

        Err(AppError::CapacityExhausted {
            attempts: self.settings.max_id_attempts,
        })
    }

    /// Constructs the public short URL for an id.
    pub fn short_url(&self, id: &str) -> String {
        format!("{}/{}", self.settings.base_url.trim_end_matches('/'), id)
    }

    /// Round-trips the store; used by the health endpoint.
    ///
    /// # Errors
    ///
    /// Returns the store's error if it is unavailable.
    pub async fn check_store(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }

    /// Allocates an id and inserts the mapping, regenerating on taken ids and
    /// insert conflicts. Both share one budget of `max_id_attempts`.
    async fn persist(&self, original_url: &str, now: DateTime<Utc>) -> Result<Mapping, AppError> {
        for attempt in 1..=self.settings.max_id_attempts {
            let Some(id) = self.draw_free_id(attempt).await? else {
                continue;
            };
            let mapping = Mapping::new(id, original_url.to_string(), now, self.settings.ttl);

            match self.insert_with_retry(&mapping).await {
                Ok(saved) => return Ok(saved),
                Err(AppError::Conflict(id)) => {
                    warn!(%id, attempt, "Short id taken between check and insert, regenerating");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::CapacityExhausted {
            attempts: self.settings.max_id_attempts,
        })
    }

    /// Draws one random id; `None` if the store already holds it.
    async fn draw_free_id(&self, attempt: usize) -> Result<Option<String>, AppError> {
        let id = generate_id(self.settings.id_length);

        if self.repository.find_by_id(&id).await?.is_some() {
            warn!(%id, attempt, "Generated short id already exists");
            return Ok(None);
        }

        Ok(Some(id))
    }

    async fn insert_with_retry(&self, mapping: &Mapping) -> Result<Mapping, AppError> {
        let strategy = ExponentialBackoff::from_millis(10)
            .max_delay(StdDuration::from_millis(500))
            .map(jitter)
            .take(STORE_WRITE_RETRIES);

        RetryIf::spawn(
            strategy,
            || self.repository.insert(mapping.clone()),
            AppError::is_transient,
        )
        .await
    }
}
