//! Core domain entities.
//!
//! The service persists a single entity, [`Mapping`].

pub mod mapping;

pub use mapping::Mapping;
