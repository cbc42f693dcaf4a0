use std::future::IntoFuture;
use std::net::SocketAddr;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use petstore_api::config::ServerConfig;
use petstore_api::router::build_app_router;
use petstore_api::state::AppState;
use petstore_db::{DbConfig, DbPool};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "petstore_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    let pool = connect_database().await;

    let state = AppState::new(pool.clone(), config.clone());
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = shutdown_tx.send(true);
        })
        .into_future();

    let drain_limit = Duration::from_secs(config.shutdown_timeout_secs);
    tokio::select! {
        result = server => result.expect("Server error"),
        _ = drain_deadline(shutdown_rx, drain_limit) => {
            tracing::warn!(
                timeout_secs = config.shutdown_timeout_secs,
                "Shutdown timeout elapsed, dropping open connections"
            );
        }
    }

    pool.close().await;
    tracing::info!("Graceful shutdown complete");
}

/// Pool with the schema migrated. Any failure here aborts startup.
async fn connect_database() -> DbPool {
    let db_config = DbConfig::from_env();
    let pool = petstore_db::create_pool(&db_config)
        .await
        .expect("Failed to connect to PostgreSQL");

    petstore_db::health_check(&pool)
        .await
        .expect("PostgreSQL did not answer SELECT 1");

    petstore_db::run_migrations(&pool)
        .await
        .expect("Failed to apply migrations");

    tracing::info!(
        max_connections = db_config.max_connections,
        "Database ready, migrations applied"
    );
    pool
}

/// Resolve `limit` after the shutdown signal has fired.
async fn drain_deadline(mut signalled: watch::Receiver<bool>, limit: Duration) {
    if signalled.wait_for(|fired| *fired).await.is_err() {
        // Sender dropped without a signal: the server already stopped.
        std::future::pending::<()>().await;
    }
    tokio::time::sleep(limit).await;
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
