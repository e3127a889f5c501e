use thiserror::Error;

/// Error reported by credential store implementations.
///
/// "Not found" is not an error at this level; lookups return `None`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Email is already registered")]
    UserExists,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage call timed out")]
    Timeout,
}

/// Top-level error for authentication operations.
///
/// Unknown email and wrong password share `InvalidCredentials`.
/// `Internal` text never contains a password, a hash, or an application secret.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid app id")]
    InvalidAppId,

    #[error("User already exists")]
    UserExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StorageError> for AuthError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::UserExists => AuthError::UserExists,
            StorageError::Database(_) | StorageError::Timeout => {
                AuthError::Internal(err.to_string())
            }
        }
    }
}

impl From<auth::PasswordError> for AuthError {
    fn from(err: auth::PasswordError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<auth::JwtError> for AuthError {
    fn from(err: auth::JwtError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
