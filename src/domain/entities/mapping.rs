//! Mapping entity: a short id pointing at an original URL until it expires.

use chrono::{DateTime, Duration, Utc};

/// A stored short id → original URL association.
///
/// Created exactly once and never updated. Expired rows stay in the store;
/// readers decide validity with [`Mapping::is_expired_at`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    pub id: String,
    pub original_url: String,
    pub expiration_date: DateTime<Utc>,
}

impl Mapping {
    /// Creates a mapping that expires `ttl` after `created_at`.
    ///
    /// An expiration past the representable range saturates at the latest
    /// representable instant.
    pub fn new(
        id: String,
        original_url: String,
        created_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            id,
            original_url,
            expiration_date: created_at
                .checked_add_signed(ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// A mapping is expired once `now` is strictly past its expiration date.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expiration_date
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}
