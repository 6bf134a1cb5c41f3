use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Access token payload.
///
/// `sub` carries the user id in decimal form; RFC 7519 requires the
/// subject to be a string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    #[serde(default)]
    pub iat: i64,
}

impl Claims {
    /// Claims for `subject_id` issued now and valid for `ttl`.
    pub fn for_subject(subject_id: i64, ttl: Duration) -> Self {
        Self::issued_at(subject_id, Utc::now(), ttl)
    }

    /// Claims for `subject_id` issued at an explicit instant.
    pub fn issued_at(subject_id: i64, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub: subject_id.to_string(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        }
    }

    /// Parse the subject back into a user id.
    pub fn subject_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}
