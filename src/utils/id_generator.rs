//! Random short id generation.
//!
//! Ids are the leading characters of a random (v4) UUID in its hyphen-less
//! hex form. Truncation makes collisions likely enough that callers must
//! check the store; see [`crate::application::services::LinkService`].

use uuid::Uuid;

/// Number of hex digits in a simple-formatted UUID.
pub const MAX_ID_LENGTH: usize = 32;

/// Draws a random lowercase-hex id of `length` characters (capped at [`MAX_ID_LENGTH`]).
pub fn generate_id(length: usize) -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(length.min(MAX_ID_LENGTH));
    id
}
