use thiserror::Error;

/// Error type for password operations.
///
/// Messages never carry the plaintext or the stored digest.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Invalid hashing cost: {0}")]
    InvalidCost(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored password hash is malformed")]
    MalformedHash,

    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}
