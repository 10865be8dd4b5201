use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Payload of an issued bearer token.
///
/// Standard RFC 7519 claims; `sub` carries the user identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a subject with an explicit lifetime.
    ///
    /// # Arguments
    /// * `subject` - User identifier
    /// * `issued_at` - Issuance instant
    /// * `expires_at` - Instant at and after which the token is rejected
    pub fn new(
        subject: impl ToString,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Check whether the token is expired at the given instant.
    ///
    /// The expiry bound is inclusive: a token is rejected from `exp` onwards.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
