use std::str::FromStr;
use std::sync::Arc;

use auth::JwtHandler;
use chrono::Duration;
use contacts_service::config::Config;
use contacts_service::domain::contact::service::ContactService;
use contacts_service::domain::user::service::UserService;
use contacts_service::inbound::http::router::create_router;
use contacts_service::outbound::repositories::PostgresContactRepository;
use contacts_service::outbound::repositories::PostgresUserRepository;
use jsonwebtoken::Algorithm;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "contacts_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "contacts-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        jwt_algorithm = %config.jwt.algorithm,
        token_lifetime_minutes = config.jwt.expiration_minutes,
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

    let algorithm = Algorithm::from_str(&config.jwt.algorithm).map_err(|e| {
        anyhow::anyhow!("Unsupported JWT algorithm {:?}: {}", config.jwt.algorithm, e)
    })?;
    let token_codec = Arc::new(JwtHandler::with_algorithm(
        config.jwt.secret.as_bytes(),
        algorithm,
    ));

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let contact_repository = Arc::new(PostgresContactRepository::new(pg_pool));

    let user_service = Arc::new(UserService::new(user_repository));
    let contact_service = Arc::new(ContactService::new(contact_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let application = create_router(
        user_service,
        contact_service,
        token_codec,
        Duration::minutes(config.jwt.expiration_minutes),
    );

    axum::serve(http_listener, application).await?;

    Ok(())
}
