//! Application layer services implementing business logic.
//!
//! Services consume the domain contracts (mapping store, URL validator) and
//! expose the two operations the HTTP layer needs: shorten and resolve.
//!
//! - [`services::link_service::LinkService`] - shortening, id allocation and redirect resolution

pub mod services;
