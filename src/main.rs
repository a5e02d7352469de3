use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taskboard::api::{create_router, AppState};
use taskboard::config::Config;
use taskboard::domain::BoardEvent;
use taskboard::infrastructure::db;

/// Board and task events buffered per SSE subscriber before it lags.
const EVENT_BUFFER: usize = 256;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = Arc::new(Config::from_env()?);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        page_size = config.board_page_size,
        "Starting taskboard"
    );

    let (events_tx, _) = broadcast::channel::<BoardEvent>(EVENT_BUFFER);
    let state = AppState::new(open_database(&config).await, events_tx, Arc::clone(&config));
    let app = create_router(state, &config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, frontend = config.frontend_dir.as_str(), "Serving boards API");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Taskboard stopped");
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,taskboard=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Without a database the API still answers health checks; board routes
/// report the store as unavailable.
async fn open_database(config: &Config) -> Option<SqlitePool> {
    match db::init_db(&config.database_url).await {
        Ok(pool) => Some(pool),
        Err(e) => {
            tracing::error!(
                error = %e,
                url = config.database_url.as_str(),
                "Board store unavailable"
            );
            None
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal = tokio::select! {
        _ = ctrl_c => "Ctrl+C",
        _ = terminate => "SIGTERM",
    };
    tracing::info!(signal, "Draining connections");
}
