use thiserror::Error;

/// Error type for JWT operations.
///
/// Never includes the signing secret.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Signing secret is empty")]
    EmptySecret,

    #[error("Token lifetime is out of range")]
    InvalidTtl,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Failed to decode token: {0}")]
    DecodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token signature does not match")]
    InvalidSignature,
}
