use std::time::Duration;

use chrono::DateTime;
use chrono::Utc;

use crate::jwt::AccessClaims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenSubject;

/// Issues and verifies access tokens signed with a per-application secret.
///
/// Holds no keys of its own: every call receives the secret of the
/// application the token is scoped to, so tokens of one application cannot
/// be verified or forged with another application's secret.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenIssuer;

impl TokenIssuer {
    pub fn new() -> Self {
        Self
    }

    /// Issue a token valid for `ttl` from now.
    ///
    /// # Errors
    /// * `EmptySecret` - Application secret is empty
    /// * `InvalidTtl` - `ttl` does not fit a timestamp
    /// * `EncodingFailed` - Signing failed
    pub fn issue(
        &self,
        subject: &TokenSubject<'_>,
        secret: &[u8],
        ttl: Duration,
    ) -> Result<String, JwtError> {
        self.issue_at(subject, secret, ttl, Utc::now())
    }

    /// Issue a token as if the current time were `issued_at`.
    pub fn issue_at(
        &self,
        subject: &TokenSubject<'_>,
        secret: &[u8],
        ttl: Duration,
        issued_at: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let ttl = chrono::Duration::from_std(ttl).map_err(|_| JwtError::InvalidTtl)?;
        if issued_at.checked_add_signed(ttl).is_none() {
            return Err(JwtError::InvalidTtl);
        }

        let claims = AccessClaims::new(subject, issued_at, ttl);
        JwtHandler::new(secret)?.encode(&claims)
    }

    /// Verify a token against an application secret and return its claims.
    ///
    /// # Errors
    /// * `InvalidSignature` - Token was not signed with `secret`
    /// * `TokenExpired` - Token lifetime has elapsed
    /// * `DecodingFailed` - Token is malformed
    pub fn verify(&self, token: &str, secret: &[u8]) -> Result<AccessClaims, JwtError> {
        JwtHandler::new(secret)?.decode(token)
    }
}
