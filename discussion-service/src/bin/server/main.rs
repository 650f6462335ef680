use std::sync::Arc;

use auth::Argon2Hasher;
use auth::Hs256TokenService;
use auth::PasswordHasher;
use auth::TokenService;
use discussion_service::config::Config;
use discussion_service::domain::user::ports::UserServicePort;
use discussion_service::domain::user::service::UserService;
use discussion_service::inbound::http::router::create_router;
use discussion_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "discussion_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "discussion-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_validity_days = config.jwt.validity_days,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    // The one concrete implementation of each auth capability, chosen here
    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2Hasher::new());
    let token_service: Arc<dyn TokenService> = Arc::new(Hs256TokenService::new(
        config.jwt.secret.as_bytes(),
        config.jwt.validity_days,
    ));

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));
    let user_service: Arc<dyn UserServicePort> =
        Arc::new(UserService::new(user_repository, password_hasher));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, token_service);
    axum::serve(http_listener, http_application).await?;

    Ok(())
}
