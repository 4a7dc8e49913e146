//! The binary entry point for the devconnector API.

use std::sync::Arc;
use std::time::Duration;

use app_core::config::{Config, DatabaseSettings, ServerSettings};
use app_core::github::{GithubClient, GithubSettings, RepositoryDirectory};
use app_core::jwt::{JwtService, JwtSettings, TokenManager};
use app_core::middleware::request_response_logger;
use axum::http::StatusCode;
use axum::{Json, Router, middleware, routing};
use sea_orm::{ConnectOptions, Database};
use tokio::signal;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::decompression::RequestDecompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const CONFIG_PATH: &str = "config/config.yaml";
const ENV_PREFIX: &str = "APP";

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(
            fmt::layer()
                .json()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_span_events(fmt::format::FmtSpan::CLOSE),
        )
        .init();

    if let Err(err) = run().await {
        panic!("❌ Application failed to start: {err}");
    }
}

/// Initializes all dependencies and starts the web server.
async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::builder(CONFIG_PATH).env_prefix(ENV_PREFIX).build()?;

    // Initialize the SeaORM database connection pool.
    let database = config.get::<DatabaseSettings>("database")?;
    let mut db_opt = ConnectOptions::new(database.url);
    db_opt
        .min_connections(database.min_connections)
        .max_connections(database.max_connections)
        .connect_timeout(Duration::from_secs(database.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(database.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(database.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(database.max_lifetime_secs))
        .sqlx_logging(database.sqlx_logging)
        .sqlx_logging_level(log::LevelFilter::Debug);

    let db_pool = Arc::new(Database::connect(db_opt).await?);

    let token_manager: Arc<dyn TokenManager> = Arc::new(JwtService::new(config.get::<JwtSettings>("jwt")?));
    let github: Arc<dyn RepositoryDirectory> = Arc::new(GithubClient::new(config.get::<GithubSettings>("github")?)?);

    // Initialize profile module
    let profile_state = profile::new(profile::Dependency { db: db_pool, token: token_manager, github });

    // Create the Router and Middlewares
    let server = config.get::<ServerSettings>("server")?;
    let app = Router::new()
        .nest("/api/profile", profile::create_router(profile_state))
        .route("/", routing::get(|| async { Json(serde_json::json!({"message": "API Running"})) }))
        .fallback(|| async { (StatusCode::NOT_FOUND, Json(serde_json::json!({"message": "Endpoint not found"}))) })
        .method_not_allowed_fallback(|| async {
            (StatusCode::METHOD_NOT_ALLOWED, Json(serde_json::json!({"message": "Method not allowed"})))
        })
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_response_logger))
                .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
                .layer(RequestDecompressionLayer::new())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(server.timeout_secs))),
        );

    let listener = tokio::net::TcpListener::bind(&server.address).await?;

    tracing::info!("🚀 listening on {}", listener.local_addr()?);

    // Every component that needs to observe shutdown subscribes to this channel.
    let (shutdown_tx, _) = broadcast::channel(1);
    spawn_shutdown_listener(shutdown_tx.clone());

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_tx.subscribe().recv().await.ok();
            tracing::info!("🛑 Server is shutting down gracefully...");
        })
        .await?;

    Ok(())
}

/// Spawns a background task to listen for system shutdown signals.
fn spawn_shutdown_listener(shutdown_tx: broadcast::Sender<()>) {
    tokio::spawn(async move {
        let ctrl_c = async {
            if let Err(err) = signal::ctrl_c().await {
                tracing::error!("Failed to install Ctrl+C handler: {}", err);
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    sigterm.recv().await;
                },
                Err(err) => {
                    tracing::error!("Failed to install SIGTERM handler: {}", err);
                    std::future::pending::<()>().await;
                },
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => { tracing::info!("🔻 Received SIGINT (Ctrl+C)")},
            _ = terminate => { tracing::info!("🔻 Received SIGTERM")},
        }

        if shutdown_tx.send(()).is_err() {
            tracing::error!("Failed to send shutdown signal");
        }
    });
}
