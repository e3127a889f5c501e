use std::collections::BTreeMap;
use std::collections::HashMap;

use async_trait::async_trait;
use secrecy::SecretString;
use tokio::sync::RwLock;

use crate::domain::auth::errors::StorageError;
use crate::domain::auth::models::App;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::NewUser;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::AppRepository;
use crate::domain::auth::ports::UserRepository;

/// Credential store kept in process memory.
///
/// Mirrors the Postgres schema constraints (unique email, identifiers
/// assigned from 1 and never reused) for local runs and tests.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    state: RwLock<State>,
}

#[derive(Debug, Default)]
struct State {
    users: BTreeMap<i64, User>,
    emails: HashMap<String, i64>,
    last_user_id: i64,
    apps: HashMap<i32, App>,
    last_app_id: i32,
    roles: BTreeMap<i32, String>,
    enrollments: HashMap<i64, Vec<i32>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a client application and return its identifier.
    pub async fn add_app(&self, name: &str, secret: &str) -> AppId {
        let mut state = self.state.write().await;
        state.last_app_id += 1;
        let id = AppId(state.last_app_id);

        state.apps.insert(
            id.0,
            App {
                id,
                name: name.to_string(),
                secret: SecretString::from(secret.to_string()),
            },
        );
        id
    }

    /// Enroll a user with a role, creating the role label on first use.
    pub async fn enroll(&self, user_id: UserId, role: &str) {
        let mut guard = self.state.write().await;
        let state = &mut *guard;

        let existing = state
            .roles
            .iter()
            .find(|(_, label)| label.as_str() == role)
            .map(|(id, _)| *id);
        let role_id = match existing {
            Some(id) => id,
            None => {
                let id = state.roles.keys().next_back().map_or(1, |last| last + 1);
                state.roles.insert(id, role.to_string());
                id
            }
        };

        let enrolled = state.enrollments.entry(user_id.0).or_default();
        if !enrolled.contains(&role_id) {
            enrolled.push(role_id);
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryCredentialStore {
    async fn save_user(&self, user: NewUser) -> Result<UserId, StorageError> {
        let mut state = self.state.write().await;

        if state.emails.contains_key(&user.email) {
            return Err(StorageError::UserExists);
        }

        state.last_user_id += 1;
        let id = UserId(state.last_user_id);

        state.emails.insert(user.email.clone(), id.0);
        state.users.insert(
            id.0,
            User {
                id,
                email: user.email,
                password_hash: user.password_hash,
                first_name: user.first_name,
                last_name: user.last_name,
                middle_name: user.middle_name,
            },
        );

        Ok(id)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        let state = self.state.read().await;

        Ok(state
            .emails
            .get(email)
            .and_then(|id| state.users.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StorageError> {
        Ok(self.state.read().await.users.get(&id.0).cloned())
    }

    async fn find_role(&self, id: UserId) -> Result<Option<String>, StorageError> {
        let state = self.state.read().await;

        if !state.users.contains_key(&id.0) {
            return Ok(None);
        }

        Ok(state
            .enrollments
            .get(&id.0)
            .and_then(|role_ids| role_ids.iter().min())
            .and_then(|role_id| state.roles.get(role_id))
            .cloned())
    }
}

#[async_trait]
impl AppRepository for InMemoryCredentialStore {
    async fn find_by_id(&self, id: AppId) -> Result<Option<App>, StorageError> {
        Ok(self.state.read().await.apps.get(&id.0).cloned())
    }
}
