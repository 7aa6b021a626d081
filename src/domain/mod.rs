//! Domain layer: entities and the contracts infrastructure must fulfil.
//!
//! - [`entities`] - the persisted [`entities::Mapping`]
//! - [`repositories`] - storage traits
//! - [`url_validator`] - the URL acceptance contract and its rejection reasons

pub mod entities;
pub mod repositories;
pub mod url_validator;
