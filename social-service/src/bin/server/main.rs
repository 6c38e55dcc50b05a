use std::sync::Arc;

use auth::Authenticator;
use auth::TokenTtl;
use social_service::config::Config;
use social_service::domain::post::service::PostService;
use social_service::domain::user::service::UserService;
use social_service::inbound::http::router::create_router;
use social_service::outbound::repositories::PostgresPostRepository;
use social_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "social_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "social-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        access_token_expiry_minutes = config.auth.access_token_expiry_minutes,
        confirm_token_expiry_minutes = config.auth.confirm_token_expiry_minutes,
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

    let token_ttl = TokenTtl {
        access_minutes: config.auth.access_token_expiry_minutes,
        confirm_minutes: config.auth.confirm_token_expiry_minutes,
    };
    let authenticator = Arc::new(Authenticator::new(config.auth.secret.as_bytes(), token_ttl));

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let post_repository = Arc::new(PostgresPostRepository::new(pg_pool));

    let user_service = Arc::new(UserService::new(user_repository, authenticator));
    let post_service = Arc::new(PostService::new(post_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, post_service);
    axum::serve(http_listener, http_application).await?;

    Ok(())
}
