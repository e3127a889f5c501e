use sqlx::migrate::Migrate;
use sqlx::postgres::PgPoolOptions;
use sso_service::config::Config;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "migrator=info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;

    let pg_pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.database.url)
        .await?;
    tracing::info!(database = "postgresql", "Connected");

    let migrator = sqlx::migrate!("./migrations");

    let pending = {
        let mut conn = pg_pool.acquire().await?;
        conn.ensure_migrations_table().await?;
        let applied = conn.list_applied_migrations().await?;

        migrator
            .iter()
            .filter(|m| !m.migration_type.is_down_migration())
            .filter(|m| !applied.iter().any(|a| a.version == m.version))
            .count()
    };

    if pending == 0 {
        tracing::info!("no migrations to apply");
        return Ok(());
    }

    migrator.run(&pg_pool).await?;
    tracing::info!(applied = pending, "Database migrations completed");

    Ok(())
}
