//! Network-facing integrations.

pub mod url_validator;

pub use url_validator::HttpUrlValidator;
