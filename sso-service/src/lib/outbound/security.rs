use std::time::Duration;

use auth::JwtError;
use auth::PasswordError;
use auth::PasswordHasher;
use auth::TokenIssuer;
use auth::TokenSubject;
use secrecy::ExposeSecret;

use crate::domain::auth::models::App;
use crate::domain::auth::models::User;
use crate::domain::auth::ports::AccessTokenIssuer;
use crate::domain::auth::ports::CredentialHasher;

impl CredentialHasher for PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordError> {
        PasswordHasher::hash(self, password)
    }

    fn verify(&self, password: &str, password_hash: &str) -> Result<bool, PasswordError> {
        PasswordHasher::verify(self, password, password_hash)
    }
}

impl AccessTokenIssuer for TokenIssuer {
    fn issue(&self, user: &User, app: &App, ttl: Duration) -> Result<String, JwtError> {
        let subject = TokenSubject {
            user_id: user.id.0,
            email: &user.email,
            app_id: app.id.0,
        };

        TokenIssuer::issue(self, &subject, app.secret.expose_secret().as_bytes(), ttl)
    }
}
