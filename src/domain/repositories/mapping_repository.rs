//! Repository trait for mapping storage.

use crate::domain::entities::Mapping;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Storage contract for [`Mapping`] rows.
///
/// The store is the only state shared between concurrent requests, so
/// [`MappingRepository::insert`] must be an atomic insert-if-absent: two
/// callers racing on the same id see exactly one success.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteMappingRepository`] - SQLite via SQLx
/// - [`crate::infrastructure::persistence::InMemoryMappingRepository`] - process-local map
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Looks up a mapping by its short id, expired or not.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on storage errors.
    async fn find_by_id(&self, id: &str) -> Result<Option<Mapping>, AppError>;

    /// Persists a new mapping.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the id is already taken.
    /// Returns [`AppError::Database`] on storage errors.
    async fn insert(&self, mapping: Mapping) -> Result<Mapping, AppError>;

    /// Counts all stored mappings.
    async fn count(&self) -> Result<i64, AppError>;

    /// Counts mappings whose expiration date is before `now`.
    async fn count_expired(&self, now: DateTime<Utc>) -> Result<i64, AppError>;

    /// Cheap round-trip used by health checks.
    async fn ping(&self) -> Result<(), AppError>;
}
