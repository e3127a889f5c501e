use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Identity a token is issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSubject<'a> {
    pub user_id: i64,
    pub email: &'a str,
    pub app_id: i32,
}

/// Access token payload.
///
/// Binds one user to one application until `exp`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// User identifier
    pub uid: i64,

    /// User email at issue time
    pub email: String,

    /// Application the token is scoped to
    pub app_id: i32,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Unique token identifier
    pub jti: String,
}

impl AccessClaims {
    /// Build claims issued at `issued_at` and valid for `ttl`.
    pub fn new(subject: &TokenSubject<'_>, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        let expiration = issued_at + ttl;

        Self {
            uid: subject.user_id,
            email: subject.email.to_string(),
            app_id: subject.app_id,
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Lifetime encoded in the token, in seconds.
    pub fn lifetime_seconds(&self) -> i64 {
        self.exp - self.iat
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
