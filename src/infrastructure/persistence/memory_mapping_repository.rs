//! In-memory implementation of the mapping repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tokio::sync::RwLock;

use crate::domain::entities::Mapping;
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;

/// Process-local mapping store. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryMappingRepository {
    mappings: RwLock<HashMap<String, Mapping>>,
}

impl InMemoryMappingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MappingRepository for InMemoryMappingRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Mapping>, AppError> {
        Ok(self.mappings.read().await.get(id).cloned())
    }

    async fn insert(&self, mapping: Mapping) -> Result<Mapping, AppError> {
        match self.mappings.write().await.entry(mapping.id.clone()) {
            Entry::Occupied(_) => Err(AppError::Conflict(mapping.id)),
            Entry::Vacant(slot) => Ok(slot.insert(mapping).clone()),
        }
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.mappings.read().await.len() as i64)
    }

    async fn count_expired(&self, now: DateTime<Utc>) -> Result<i64, AppError> {
        Ok(self
            .mappings
            .read()
            .await
            .values()
            .filter(|m| m.is_expired_at(now))
            .count() as i64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
