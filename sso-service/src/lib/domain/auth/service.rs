use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use secrecy::SecretString;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::StorageError;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::NewUser;
use crate::domain::auth::models::RegisterUserCommand;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::AccessTokenIssuer;
use crate::domain::auth::ports::AppRepository;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::CredentialHasher;
use crate::domain::auth::ports::UserRepository;

/// Tunables of the authentication service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthSettings {
    /// Lifetime of issued tokens
    pub token_ttl: Duration,
    /// Deadline for a single store call
    pub store_timeout: Duration,
}

/// Domain service implementation for authentication operations.
///
/// Stateless orchestrator over injected store, hasher and issuer; safe to
/// share across concurrent requests.
pub struct AuthService<UR, AR, H, T>
where
    UR: UserRepository,
    AR: AppRepository,
    H: CredentialHasher,
    T: AccessTokenIssuer,
{
    users: Arc<UR>,
    apps: Arc<AR>,
    hasher: Arc<H>,
    issuer: Arc<T>,
    settings: AuthSettings,
}

impl<UR, AR, H, T> AuthService<UR, AR, H, T>
where
    UR: UserRepository,
    AR: AppRepository,
    H: CredentialHasher,
    T: AccessTokenIssuer,
{
    /// Create a new authentication service with injected dependencies.
    pub fn new(
        users: Arc<UR>,
        apps: Arc<AR>,
        hasher: Arc<H>,
        issuer: Arc<T>,
        settings: AuthSettings,
    ) -> Self {
        Self {
            users,
            apps,
            hasher,
            issuer,
            settings,
        }
    }

    async fn within_deadline<V, F>(&self, call: F) -> Result<V, StorageError>
    where
        F: Future<Output = Result<V, StorageError>>,
    {
        tokio::time::timeout(self.settings.store_timeout, call)
            .await
            .unwrap_or(Err(StorageError::Timeout))
    }

    async fn hash_password(&self, password: SecretString) -> Result<String, AuthError> {
        let hasher = Arc::clone(&self.hasher);

        tokio::task::spawn_blocking(move || hasher.hash(password.expose_secret()))
            .await
            .map_err(|e| AuthError::Internal(format!("Password hashing task failed: {}", e)))?
            .map_err(AuthError::from)
    }

    async fn verify_password(
        &self,
        password: SecretString,
        password_hash: String,
    ) -> Result<bool, AuthError> {
        let hasher = Arc::clone(&self.hasher);

        tokio::task::spawn_blocking(move || hasher.verify(password.expose_secret(), &password_hash))
            .await
            .map_err(|e| {
                AuthError::Internal(format!("Password verification task failed: {}", e))
            })?
            .map_err(AuthError::from)
    }
}

fn require(value: &str, field: &'static str) -> Result<(), AuthError> {
    if value.is_empty() {
        return Err(AuthError::MissingField(field));
    }
    Ok(())
}

#[async_trait]
impl<UR, AR, H, T> AuthServicePort for AuthService<UR, AR, H, T>
where
    UR: UserRepository,
    AR: AppRepository,
    H: CredentialHasher,
    T: AccessTokenIssuer,
{
    #[tracing::instrument(skip_all, fields(op = "auth.login", app_id = %command.app_id))]
    async fn login(&self, command: LoginCommand) -> Result<String, AuthError> {
        if command.email.is_empty() || command.password.expose_secret().is_empty() {
            tracing::warn!("empty email or password");
            return Err(AuthError::InvalidCredentials);
        }
        if command.app_id.is_unset() {
            return Err(AuthError::InvalidAppId);
        }

        tracing::info!("attempting to login user");

        let user = match self
            .within_deadline(self.users.find_by_email(&command.email))
            .await
        {
            Ok(Some(user)) => user,
            Ok(None) => {
                tracing::warn!("user not found");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to get user");
                return Err(e.into());
            }
        };

        let matched = self
            .verify_password(command.password, user.password_hash.clone())
            .await
            .map_err(|e| {
                tracing::error!(user_id = %user.id, error = %e, "failed to verify password");
                e
            })?;
        if !matched {
            tracing::info!(user_id = %user.id, "invalid credentials");
            return Err(AuthError::InvalidCredentials);
        }

        let app = match self
            .within_deadline(self.apps.find_by_id(command.app_id))
            .await
        {
            Ok(Some(app)) => app,
            Ok(None) => {
                tracing::warn!("app not found");
                return Err(AuthError::InvalidAppId);
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to get app");
                return Err(e.into());
            }
        };

        let token = self
            .issuer
            .issue(&user, &app, self.settings.token_ttl)
            .map_err(|e| {
                tracing::error!(user_id = %user.id, error = %e, "failed to generate token");
                AuthError::from(e)
            })?;

        tracing::info!(user_id = %user.id, "user logged in successfully");

        Ok(token)
    }

    #[tracing::instrument(skip_all, fields(op = "auth.register_new_user"))]
    async fn register_new_user(&self, command: RegisterUserCommand) -> Result<UserId, AuthError> {
        require(&command.email, "email")?;
        require(command.password.expose_secret(), "password")?;
        require(&command.first_name, "first_name")?;
        require(&command.last_name, "last_name")?;

        tracing::info!("registering user");

        let RegisterUserCommand {
            email,
            password,
            first_name,
            last_name,
            middle_name,
        } = command;

        let password_hash = self.hash_password(password).await.map_err(|e| {
            tracing::error!(error = %e, "failed to generate password hash");
            e
        })?;

        let new_user = NewUser {
            email,
            password_hash,
            first_name,
            last_name,
            middle_name,
        };

        match self.within_deadline(self.users.save_user(new_user)).await {
            Ok(id) => {
                tracing::info!(user_id = %id, "user registered");
                Ok(id)
            }
            Err(StorageError::UserExists) => {
                tracing::warn!("user already exists");
                Err(AuthError::UserExists)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to save user");
                Err(e.into())
            }
        }
    }

    #[tracing::instrument(skip_all, fields(op = "auth.user_role", user_id = %user_id))]
    async fn user_role(&self, user_id: UserId) -> Result<String, AuthError> {
        if user_id.is_unset() {
            return Err(AuthError::MissingField("user_id"));
        }

        tracing::info!("checking user role");

        match self.within_deadline(self.users.find_role(user_id)).await {
            Ok(Some(role)) => {
                tracing::info!(user_role = %role, "checked user role");
                Ok(role)
            }
            Ok(None) => {
                tracing::warn!("user not found");
                Err(AuthError::UserNotFound)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to check role of the user");
                Err(e.into())
            }
        }
    }

    #[tracing::instrument(skip_all, fields(op = "auth.user_exists", user_id = %user_id))]
    async fn user_exists(&self, user_id: UserId) -> Result<bool, AuthError> {
        if user_id.is_unset() {
            return Err(AuthError::MissingField("user_id"));
        }

        match self.within_deadline(self.users.find_by_id(user_id)).await {
            Ok(user) => Ok(user.is_some()),
            Err(e) => {
                tracing::error!(error = %e, "failed to look up user");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use auth::JwtError;
    use auth::PasswordError;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::auth::models::App;
    use crate::domain::auth::models::AppId;
    use crate::domain::auth::models::User;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn save_user(&self, user: NewUser) -> Result<UserId, StorageError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, StorageError>;
            async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StorageError>;
            async fn find_role(&self, id: UserId) -> Result<Option<String>, StorageError>;
        }
    }

    mock! {
        pub TestAppRepository {}

        #[async_trait]
        impl AppRepository for TestAppRepository {
            async fn find_by_id(&self, id: AppId) -> Result<Option<App>, StorageError>;
        }
    }

    mock! {
        pub TestHasher {}

        impl CredentialHasher for TestHasher {
            fn hash(&self, password: &str) -> Result<String, PasswordError>;
            fn verify(&self, password: &str, password_hash: &str) -> Result<bool, PasswordError>;
        }
    }

    mock! {
        pub TestIssuer {}

        impl AccessTokenIssuer for TestIssuer {
            fn issue(&self, user: &User, app: &App, ttl: Duration) -> Result<String, JwtError>;
        }
    }

    struct Mocks {
        users: MockTestUserRepository,
        apps: MockTestAppRepository,
        hasher: MockTestHasher,
        issuer: MockTestIssuer,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                users: MockTestUserRepository::new(),
                apps: MockTestAppRepository::new(),
                hasher: MockTestHasher::new(),
                issuer: MockTestIssuer::new(),
            }
        }

        fn into_service(
            self,
        ) -> AuthService<MockTestUserRepository, MockTestAppRepository, MockTestHasher, MockTestIssuer>
        {
            AuthService::new(
                Arc::new(self.users),
                Arc::new(self.apps),
                Arc::new(self.hasher),
                Arc::new(self.issuer),
                settings(),
            )
        }
    }

    fn settings() -> AuthSettings {
        AuthSettings {
            token_ttl: Duration::from_secs(3600),
            store_timeout: Duration::from_secs(5),
        }
    }

    fn stored_user() -> User {
        User {
            id: UserId(1),
            email: "a@x.com".to_string(),
            password_hash: "$argon2id$stored".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            middle_name: String::new(),
        }
    }

    fn stored_app() -> App {
        App {
            id: AppId(1),
            name: "portal".to_string(),
            secret: SecretString::from("portal-signing-secret".to_string()),
        }
    }

    fn login(email: &str, password: &str, app_id: i32) -> LoginCommand {
        LoginCommand::new(email.to_string(), password.to_string(), AppId(app_id))
    }

    fn register(email: &str) -> RegisterUserCommand {
        RegisterUserCommand::new(
            email.to_string(),
            "secret1".to_string(),
            "Jane".to_string(),
            "Doe".to_string(),
            String::new(),
        )
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut mocks = Mocks::new();

        mocks
            .users
            .expect_find_by_email()
            .withf(|email| email == "a@x.com")
            .times(1)
            .returning(|_| Ok(Some(stored_user())));
        mocks
            .hasher
            .expect_verify()
            .withf(|password, hash| password == "secret1" && hash == "$argon2id$stored")
            .times(1)
            .returning(|_, _| Ok(true));
        mocks
            .apps
            .expect_find_by_id()
            .with(eq(AppId(1)))
            .times(1)
            .returning(|_| Ok(Some(stored_app())));
        mocks
            .issuer
            .expect_issue()
            .withf(|user, app, ttl| {
                user.id == UserId(1) && app.id == AppId(1) && *ttl == Duration::from_secs(3600)
            })
            .times(1)
            .returning(|_, _, _| Ok("signed.token.value".to_string()));

        let service = mocks.into_service();

        let token = service.login(login("a@x.com", "secret1", 1)).await;
        assert_eq!(token, Ok("signed.token.value".to_string()));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut mocks = Mocks::new();

        mocks
            .users
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        mocks.hasher.expect_verify().times(0);
        mocks.apps.expect_find_by_id().times(0);
        mocks.issuer.expect_issue().times(0);

        let service = mocks.into_service();

        let result = service.login(login("ghost@x.com", "secret1", 1)).await;
        assert_eq!(result, Err(AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut mocks = Mocks::new();

        mocks
            .users
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(stored_user())));
        mocks
            .hasher
            .expect_verify()
            .times(1)
            .returning(|_, _| Ok(false));
        mocks.apps.expect_find_by_id().times(0);
        mocks.issuer.expect_issue().times(0);

        let service = mocks.into_service();

        let result = service.login(login("a@x.com", "wrongpass", 1)).await;
        assert_eq!(result, Err(AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_unknown_app() {
        let mut mocks = Mocks::new();

        mocks
            .users
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(stored_user())));
        mocks
            .hasher
            .expect_verify()
            .times(1)
            .returning(|_, _| Ok(true));
        mocks
            .apps
            .expect_find_by_id()
            .with(eq(AppId(999)))
            .times(1)
            .returning(|_| Ok(None));
        mocks.issuer.expect_issue().times(0);

        let service = mocks.into_service();

        let result = service.login(login("a@x.com", "secret1", 999)).await;
        assert_eq!(result, Err(AuthError::InvalidAppId));
    }

    #[tokio::test]
    async fn test_login_store_failure_is_internal() {
        let mut mocks = Mocks::new();

        mocks
            .users
            .expect_find_by_email()
            .times(1)
            .returning(|_| Err(StorageError::Database("connection refused".to_string())));

        let service = mocks.into_service();

        let result = service.login(login("a@x.com", "secret1", 1)).await;
        assert!(matches!(result, Err(AuthError::Internal(_))));
    }

    #[tokio::test]
    async fn test_login_malformed_hash_is_internal() {
        let mut mocks = Mocks::new();

        mocks
            .users
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(stored_user())));
        mocks
            .hasher
            .expect_verify()
            .times(1)
            .returning(|_, _| Err(PasswordError::MalformedHash));

        let service = mocks.into_service();

        let result = service.login(login("a@x.com", "secret1", 1)).await;
        assert!(matches!(result, Err(AuthError::Internal(_))));
    }

    #[tokio::test]
    async fn test_login_issuer_failure_does_not_leak_secret() {
        let mut mocks = Mocks::new();

        mocks
            .users
            .expect_find_by_email()
            .returning(|_| Ok(Some(stored_user())));
        mocks.hasher.expect_verify().returning(|_, _| Ok(true));
        mocks
            .apps
            .expect_find_by_id()
            .returning(|_| Ok(Some(stored_app())));
        mocks
            .issuer
            .expect_issue()
            .returning(|_, _, _| Err(JwtError::EncodingFailed("hmac failure".to_string())));

        let service = mocks.into_service();

        let result = service.login(login("a@x.com", "secret1", 1)).await;
        match result {
            Err(AuthError::Internal(message)) => {
                assert!(!message.contains("portal-signing-secret"));
                assert!(!message.contains("secret1"));
            }
            other => panic!("expected internal error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_login_rejects_empty_input_without_store_access() {
        let mut mocks = Mocks::new();
        mocks.users.expect_find_by_email().times(0);
        mocks.apps.expect_find_by_id().times(0);

        let service = mocks.into_service();

        assert_eq!(
            service.login(login("", "secret1", 1)).await,
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            service.login(login("a@x.com", "", 1)).await,
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            service.login(login("a@x.com", "secret1", 0)).await,
            Err(AuthError::InvalidAppId)
        );
    }

    struct StalledUsers;

    #[async_trait]
    impl UserRepository for StalledUsers {
        async fn save_user(&self, _user: NewUser) -> Result<UserId, StorageError> {
            std::future::pending().await
        }

        async fn find_by_email(&self, _email: &str) -> Result<Option<User>, StorageError> {
            std::future::pending().await
        }

        async fn find_by_id(&self, _id: UserId) -> Result<Option<User>, StorageError> {
            std::future::pending().await
        }

        async fn find_role(&self, _id: UserId) -> Result<Option<String>, StorageError> {
            std::future::pending().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_deadline_is_internal() {
        let service = AuthService::new(
            Arc::new(StalledUsers),
            Arc::new(MockTestAppRepository::new()),
            Arc::new(MockTestHasher::new()),
            Arc::new(MockTestIssuer::new()),
            settings(),
        );

        let timed_out = Err(AuthError::Internal("Storage call timed out".to_string()));
        assert_eq!(service.login(login("a@x.com", "secret1", 1)).await, timed_out);
        assert_eq!(service.user_role(UserId(1)).await, timed_out);
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut mocks = Mocks::new();

        mocks
            .hasher
            .expect_hash()
            .withf(|password| password == "secret1")
            .times(1)
            .returning(|_| Ok("$argon2id$fresh".to_string()));
        mocks
            .users
            .expect_save_user()
            .withf(|user| {
                user.email == "a@x.com"
                    && user.password_hash == "$argon2id$fresh"
                    && user.first_name == "Jane"
                    && user.last_name == "Doe"
                    && user.middle_name.is_empty()
            })
            .times(1)
            .returning(|_| Ok(UserId(1)));

        let service = mocks.into_service();

        let result = service.register_new_user(register("a@x.com")).await;
        assert_eq!(result, Ok(UserId(1)));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut mocks = Mocks::new();

        mocks
            .hasher
            .expect_hash()
            .returning(|_| Ok("$argon2id$fresh".to_string()));
        mocks
            .users
            .expect_save_user()
            .times(1)
            .returning(|_| Err(StorageError::UserExists));

        let service = mocks.into_service();

        let result = service.register_new_user(register("a@x.com")).await;
        assert_eq!(result, Err(AuthError::UserExists));
    }

    #[tokio::test]
    async fn test_register_hasher_failure_skips_store() {
        let mut mocks = Mocks::new();

        mocks
            .hasher
            .expect_hash()
            .returning(|_| Err(PasswordError::HashingFailed("out of memory".to_string())));
        mocks.users.expect_save_user().times(0);

        let service = mocks.into_service();

        let result = service.register_new_user(register("a@x.com")).await;
        assert!(matches!(result, Err(AuthError::Internal(_))));
    }

    #[tokio::test]
    async fn test_register_requires_fields() {
        let mut mocks = Mocks::new();
        mocks.hasher.expect_hash().times(0);
        mocks.users.expect_save_user().times(0);

        let service = mocks.into_service();

        let missing_last_name = RegisterUserCommand::new(
            "a@x.com".to_string(),
            "secret1".to_string(),
            "Jane".to_string(),
            String::new(),
            String::new(),
        );

        assert_eq!(
            service.register_new_user(register("")).await,
            Err(AuthError::MissingField("email"))
        );
        assert_eq!(
            service.register_new_user(missing_last_name).await,
            Err(AuthError::MissingField("last_name"))
        );
    }

    #[tokio::test]
    async fn test_user_role_found() {
        let mut mocks = Mocks::new();

        mocks
            .users
            .expect_find_role()
            .with(eq(UserId(1)))
            .times(1)
            .returning(|_| Ok(Some("admin".to_string())));

        let service = mocks.into_service();

        assert_eq!(service.user_role(UserId(1)).await, Ok("admin".to_string()));
    }

    #[tokio::test]
    async fn test_user_role_without_enrollment_is_not_found() {
        let mut mocks = Mocks::new();

        mocks
            .users
            .expect_find_role()
            .times(1)
            .returning(|_| Ok(None));

        let service = mocks.into_service();

        assert_eq!(
            service.user_role(UserId(42)).await,
            Err(AuthError::UserNotFound)
        );
    }

    #[tokio::test]
    async fn test_user_role_store_failure() {
        let mut mocks = Mocks::new();

        mocks
            .users
            .expect_find_role()
            .returning(|_| Err(StorageError::Database("deadlock".to_string())));

        let service = mocks.into_service();

        assert!(matches!(
            service.user_role(UserId(1)).await,
            Err(AuthError::Internal(_))
        ));
    }

    #[tokio::test]
    async fn test_user_exists() {
        let mut mocks = Mocks::new();

        mocks
            .users
            .expect_find_by_id()
            .with(eq(UserId(1)))
            .returning(|_| Ok(Some(stored_user())));
        mocks
            .users
            .expect_find_by_id()
            .with(eq(UserId(42)))
            .returning(|_| Ok(None));

        let service = mocks.into_service();

        assert_eq!(service.user_exists(UserId(1)).await, Ok(true));
        assert_eq!(service.user_exists(UserId(42)).await, Ok(false));
    }

    #[tokio::test]
    async fn test_user_exists_store_failure() {
        let mut mocks = Mocks::new();

        mocks
            .users
            .expect_find_by_id()
            .returning(|_| Err(StorageError::Timeout));

        let service = mocks.into_service();

        assert!(matches!(
            service.user_exists(UserId(1)).await,
            Err(AuthError::Internal(_))
        ));
    }

    #[tokio::test]
    async fn test_zero_user_id_rejected() {
        let service = Mocks::new().into_service();

        assert_eq!(
            service.user_exists(UserId(0)).await,
            Err(AuthError::MissingField("user_id"))
        );
        assert_eq!(
            service.user_role(UserId(0)).await,
            Err(AuthError::MissingField("user_id"))
        );
    }
}
