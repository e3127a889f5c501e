use tonic::Status;

use crate::domain::auth::errors::AuthError;

pub mod login;
pub mod register;
pub mod user_exists;
pub mod user_role;

/// Map a domain error to a transport status.
///
/// Internal details are logged here and replaced by a fixed message; the
/// client never sees store or hasher error text.
impl From<AuthError> for Status {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Status::invalid_argument("invalid email or password"),
            AuthError::InvalidAppId => Status::invalid_argument("invalid app_id"),
            AuthError::UserExists => Status::already_exists("user already exists"),
            AuthError::UserNotFound => Status::not_found("user not found"),
            AuthError::MissingField(field) => {
                Status::invalid_argument(format!("{} is required", field))
            }
            AuthError::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed");
                Status::internal("internal error")
            }
        }
    }
}

pub(crate) fn require_text(value: &str, field: &str) -> Result<(), Status> {
    if value.is_empty() {
        return Err(Status::invalid_argument(format!("{} is required", field)));
    }
    Ok(())
}

pub(crate) fn require_id(value: i64, field: &str) -> Result<(), Status> {
    if value == 0 {
        return Err(Status::invalid_argument(format!("{} is required", field)));
    }
    Ok(())
}
