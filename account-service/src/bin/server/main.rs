use std::sync::Arc;

use account_service::config::Config;
use account_service::config::DatabaseBackend;
use account_service::domain::user::ports::UserServicePort;
use account_service::domain::user::service::UserService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::InMemoryUserRepository;
use account_service::outbound::repositories::PostgresUserRepository;
use anyhow::Context;
use auth::Authenticator;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        backend = ?config.database.backend,
        http_port = config.server.http_port,
        jwt = ?config.jwt,
        "Configuration loaded"
    );

    let token_config = config
        .jwt
        .token_config()
        .context("invalid jwt configuration")?;
    let authenticator = Arc::new(Authenticator::new(token_config));

    let user_service: Arc<dyn UserServicePort> = match config.database.backend {
        DatabaseBackend::Postgres => {
            let url = config
                .database
                .url
                .as_deref()
                .context("database.url is required for the postgres backend")?;

            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));
            Arc::new(UserService::new(user_repository, authenticator))
        }
        DatabaseBackend::Memory => {
            tracing::warn!("Using the in-memory record store; data is lost on restart");
            let user_repository = Arc::new(InMemoryUserRepository::new());
            Arc::new(UserService::new(user_repository, authenticator))
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, &config.server.allowed_origins);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
