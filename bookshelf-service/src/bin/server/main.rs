use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use bookshelf_service::config::Config;
use bookshelf_service::domain::book::ports::BookRepository;
use bookshelf_service::domain::book::service::BookService;
use bookshelf_service::domain::session::service::SessionService;
use bookshelf_service::domain::user::ports::UserRepository;
use bookshelf_service::domain::user::service::UserService;
use bookshelf_service::inbound::http::router::cors_layer;
use bookshelf_service::inbound::http::router::create_router;
use bookshelf_service::inbound::http::router::AppState;
use bookshelf_service::outbound::repositories::InMemoryBookRepository;
use bookshelf_service::outbound::repositories::InMemoryUserRepository;
use bookshelf_service::outbound::repositories::PostgresBookRepository;
use bookshelf_service::outbound::repositories::PostgresUserRepository;
use chrono::Duration;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookshelf_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "bookshelf-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        persistence = if config.database.is_some() { "postgresql" } else { "memory" },
        token_ttl_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    let password_hasher = PasswordHasher::with_params(config.password.into())?;
    let authenticator = Arc::new(
        Authenticator::new(
            config.jwt.secret.as_bytes(),
            Duration::hours(config.jwt.expiration_hours),
        )
        .with_password_hasher(password_hasher),
    );

    let state = match &config.database {
        Some(database) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(database.max_connections)
                .connect(&database.url)
                .await?;
            tracing::info!(
                max_connections = database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            build_state(
                Arc::new(PostgresUserRepository::new(pg_pool.clone())),
                Arc::new(PostgresBookRepository::new(pg_pool)),
                authenticator,
            )
        }
        None => {
            tracing::warn!("No database configured, data will not survive a restart");
            build_state(
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryBookRepository::new()),
                authenticator,
            )
        }
    };

    let cors = cors_layer(config.server.cors_allowed_origin.as_deref())?;

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(state, cors)).await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

fn build_state<UR, BR>(
    user_repository: Arc<UR>,
    book_repository: Arc<BR>,
    authenticator: Arc<Authenticator>,
) -> AppState
where
    UR: UserRepository,
    BR: BookRepository,
{
    AppState {
        user_service: Arc::new(UserService::new(
            Arc::clone(&user_repository),
            Arc::clone(&authenticator),
        )),
        session_service: Arc::new(SessionService::new(user_repository, authenticator)),
        book_service: Arc::new(BookService::new(book_repository)),
    }
}
