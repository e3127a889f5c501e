use std::sync::Arc;

use auth::PasswordHasher;
use auth::TokenIssuer;
use sqlx::postgres::PgPoolOptions;
use sso_service::config::Config;
use sso_service::domain::auth::service::AuthService;
use sso_service::inbound::grpc::AuthGrpcService;
use sso_service::outbound::repositories::PostgresAppRepository;
use sso_service::outbound::repositories::PostgresUserRepository;
use sso_service::proto::auth_server::AuthServer;
use tonic::transport::Server;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sso_service=debug,tonic=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "sso-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        grpc_port = config.server.grpc_port,
        request_timeout_seconds = config.server.request_timeout_seconds,
        token_ttl_seconds = config.token.ttl_seconds,
        store_timeout_seconds = config.storage.call_timeout_seconds,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let cost = config.hasher.cost()?;
    tracing::info!(
        memory_kib = cost.memory_kib,
        iterations = cost.iterations,
        parallelism = cost.parallelism,
        "Password hasher configured"
    );

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let app_repository = Arc::new(PostgresAppRepository::new(pg_pool));
    let hasher = Arc::new(PasswordHasher::with_cost(cost)?);
    let issuer = Arc::new(TokenIssuer::new());

    let auth_service = Arc::new(AuthService::new(
        user_repository,
        app_repository,
        hasher,
        issuer,
        config.auth_settings(),
    ));

    let grpc_address = format!("0.0.0.0:{}", config.server.grpc_port).parse()?;
    let grpc_service = AuthGrpcService::new(auth_service);
    tracing::info!(
        address = %grpc_address,
        port = config.server.grpc_port,
        protocol = "grpc",
        "gRpc server listening"
    );

    Server::builder()
        .timeout(config.request_timeout())
        .add_service(AuthServer::new(grpc_service))
        .serve_with_shutdown(grpc_address, shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => tracing::error!(error = %e, "Failed to listen for shutdown signal"),
    }
}
