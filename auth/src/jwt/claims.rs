use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by every issued token.
///
/// The subject is the account email. Expiration is always issuance time plus
/// a fixed lifetime; claims are never persisted outside the encoded token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account email)
    pub sub: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Create claims for a subject, expiring `lifetime` from now.
    ///
    /// # Arguments
    /// * `subject` - Account email the token represents
    /// * `lifetime` - Duration until the token expires
    pub fn for_subject(subject: impl Into<String>, lifetime: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: subject.into(),
            exp: (now + lifetime).timestamp(),
            iat: now.timestamp(),
        }
    }

    /// Check if the claims are expired at the given timestamp.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
