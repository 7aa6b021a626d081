//! Helpers used by the validator and the link service.
//!
//! - [`id_generator`] - random short id generation
//! - [`public_address`] - public IP and reserved host name checks
//! - [`url_format`] - syntactic http(s) URL checks

pub mod id_generator;
pub mod public_address;
pub mod url_format;
