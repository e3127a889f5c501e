use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::auth::errors::StorageError;
use crate::domain::auth::models::NewUser;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::UserRepository;

const USERS_EMAIL_KEY: &str = "users_email_key";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct UserRow {
    id: i64,
    email: String,
    pass_hash: String,
    first_name: String,
    last_name: String,
    middle_name: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId(row.id),
            email: row.email,
            password_hash: row.pass_hash,
            first_name: row.first_name,
            last_name: row.last_name,
            middle_name: row.middle_name,
        }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn save_user(&self, user: NewUser) -> Result<UserId, StorageError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (email, pass_hash, first_name, last_name, middle_name)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.middle_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some(USERS_EMAIL_KEY) {
                    return StorageError::UserExists;
                }
            }
            StorageError::Database(e.to_string())
        })?;

        Ok(UserId(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, pass_hash, first_name, last_name, middle_name
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(row.map(User::from))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StorageError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, pass_hash, first_name, last_name, middle_name
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(row.map(User::from))
    }

    async fn find_role(&self, id: UserId) -> Result<Option<String>, StorageError> {
        sqlx::query_scalar::<_, String>(
            r#"
            SELECT r.role
            FROM roles r
            INNER JOIN enrollments en ON r.id = en.role_id
            WHERE en.user_id = $1
            ORDER BY r.id
            LIMIT 1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Database(e.to_string()))
    }
}
