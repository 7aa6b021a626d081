//! Mapping store implementations.
//!
//! - [`SqliteMappingRepository`] - durable storage via SQLx, schema in `migrations/`
//! - [`InMemoryMappingRepository`] - process-local store for tests and throwaway runs

pub mod memory_mapping_repository;
pub mod sqlite_mapping_repository;

pub use memory_mapping_repository::InMemoryMappingRepository;
pub use sqlite_mapping_repository::{SqliteMappingRepository, connect};
