//! Infrastructure layer for external integrations.
//!
//! Concrete implementations of the domain contracts:
//!
//! - [`persistence`] - SQLite and in-memory mapping stores
//! - [`http`] - network-backed URL validator

pub mod http;
pub mod persistence;
