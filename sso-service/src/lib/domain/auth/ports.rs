use std::time::Duration;

use async_trait::async_trait;
use auth::JwtError;
use auth::PasswordError;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::StorageError;
use crate::domain::auth::models::App;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::NewUser;
use crate::domain::auth::models::RegisterUserCommand;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;

/// Port for authentication domain operations.
///
/// Dropping a returned future cancels the operation, including any store
/// call in flight.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify credentials and issue a token scoped to one application.
    ///
    /// # Arguments
    /// * `command` - Email, password and application identifier
    ///
    /// # Returns
    /// Signed access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `InvalidAppId` - Application does not exist
    /// * `Internal` - Store, hasher or issuer failure
    async fn login(&self, command: LoginCommand) -> Result<String, AuthError>;

    /// Register a new user.
    ///
    /// # Arguments
    /// * `command` - Email, password and profile fields
    ///
    /// # Returns
    /// Identifier assigned by the store
    ///
    /// # Errors
    /// * `MissingField` - A required field is empty
    /// * `UserExists` - Email is already registered
    /// * `Internal` - Store or hasher failure
    async fn register_new_user(&self, command: RegisterUserCommand) -> Result<UserId, AuthError>;

    /// Resolve the role a user is enrolled with.
    ///
    /// # Errors
    /// * `MissingField` - Identifier is zero
    /// * `UserNotFound` - No user or no enrollment
    /// * `Internal` - Store failure
    async fn user_role(&self, user_id: UserId) -> Result<String, AuthError>;

    /// Check whether a user record exists.
    ///
    /// # Errors
    /// * `MissingField` - Identifier is zero
    /// * `Internal` - Store failure
    async fn user_exists(&self, user_id: UserId) -> Result<bool, AuthError>;
}

/// Persistence operations for users and their role enrollments.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Returns
    /// Identifier assigned by the store
    ///
    /// # Errors
    /// * `UserExists` - Email uniqueness constraint violated
    /// * `Database` - Database operation failed
    async fn save_user(&self, user: NewUser) -> Result<UserId, StorageError>;

    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StorageError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StorageError>;

    /// Retrieve the role of a user.
    ///
    /// When several enrollments exist, the role with the lowest identifier wins.
    ///
    /// # Returns
    /// Optional role label (None if the user has no enrollment)
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn find_role(&self, id: UserId) -> Result<Option<String>, StorageError>;
}

/// Lookup of registered client applications.
#[async_trait]
pub trait AppRepository: Send + Sync + 'static {
    /// Retrieve application by identifier.
    ///
    /// # Returns
    /// Optional application (None if not found)
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn find_by_id(&self, id: AppId) -> Result<Option<App>, StorageError>;
}

/// One-way salted password hashing.
///
/// Implementations are CPU-bound; the service runs them off the async executor.
pub trait CredentialHasher: Send + Sync + 'static {
    fn hash(&self, password: &str) -> Result<String, PasswordError>;

    /// Constant-time comparison of `password` against a stored digest.
    fn verify(&self, password: &str, password_hash: &str) -> Result<bool, PasswordError>;
}

/// Issues signed tokens binding a user to an application.
pub trait AccessTokenIssuer: Send + Sync + 'static {
    fn issue(&self, user: &User, app: &App, ttl: Duration) -> Result<String, JwtError>;
}
