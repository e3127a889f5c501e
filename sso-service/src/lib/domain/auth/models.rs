use std::fmt;

use secrecy::SecretString;

/// Registered user.
///
/// `password_hash` is an Argon2id PHC string and never leaves the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
}

/// Store-assigned user identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

impl UserId {
    /// Zero is never assigned by the store and marks an absent identifier.
    pub fn is_unset(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Client application of the SSO service.
///
/// The secret signs every token issued for this application. Its `Debug`
/// output is redacted.
#[derive(Debug, Clone)]
pub struct App {
    pub id: AppId,
    pub name: String,
    pub secret: SecretString,
}

/// Application identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AppId(pub i32);

impl AppId {
    pub fn is_unset(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// User record to persist; the store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
}

/// Command to authenticate a user for one application
#[derive(Debug)]
pub struct LoginCommand {
    pub email: String,
    pub password: SecretString,
    pub app_id: AppId,
}

impl LoginCommand {
    pub fn new(email: String, password: String, app_id: AppId) -> Self {
        Self {
            email,
            password: SecretString::from(password),
            app_id,
        }
    }
}

/// Command to register a new user.
///
/// `middle_name` may be empty.
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub email: String,
    pub password: SecretString,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
}

impl RegisterUserCommand {
    pub fn new(
        email: String,
        password: String,
        first_name: String,
        last_name: String,
        middle_name: String,
    ) -> Self {
        Self {
            email,
            password: SecretString::from(password),
            first_name,
            last_name,
            middle_name,
        }
    }
}
