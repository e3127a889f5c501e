use async_trait::async_trait;
use secrecy::SecretString;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::auth::errors::StorageError;
use crate::domain::auth::models::App;
use crate::domain::auth::models::AppId;
use crate::domain::auth::ports::AppRepository;

pub struct PostgresAppRepository {
    pool: PgPool,
}

impl PostgresAppRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct AppRow {
    id: i32,
    name: String,
    secret: String,
}

impl From<AppRow> for App {
    fn from(row: AppRow) -> Self {
        Self {
            id: AppId(row.id),
            name: row.name,
            secret: SecretString::from(row.secret),
        }
    }
}

#[async_trait]
impl AppRepository for PostgresAppRepository {
    async fn find_by_id(&self, id: AppId) -> Result<Option<App>, StorageError> {
        let row = sqlx::query_as::<_, AppRow>(
            r#"
            SELECT id, name, secret
            FROM apps
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(row.map(App::from))
    }
}
