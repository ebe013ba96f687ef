//! DriveBox Server — file-entry hierarchy with batch moves.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use drivebox_core::config::AppConfig;
use drivebox_core::error::AppError;
use drivebox_core::events::EventBus;
use drivebox_database::connection::DatabasePool;
use drivebox_database::repositories::entry::{EntryStore, PgEntryRepository};
use drivebox_service::acl::OwnerAuthorizer;
use drivebox_service::entry::EntryMoveService;

#[tokio::main]
async fn main() {
    let env = std::env::var("DRIVEBOX_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting DriveBox v{}", env!("CARGO_PKG_VERSION"));

    // ── Database connection + migrations ─────────────────────────
    let db = DatabasePool::connect(&config.database).await?;
    drivebox_database::migration::run_migrations(db.pool()).await?;

    // ── Repositories ─────────────────────────────────────────────
    let entry_store: Arc<dyn EntryStore> =
        Arc::new(PgEntryRepository::new(db.pool().clone()));

    // ── Event bus ────────────────────────────────────────────────
    // Downstream listeners (cache invalidation, search reindexing,
    // audit log) subscribe here; the built-in one just logs.
    let event_bus = Arc::new(EventBus::new(64));
    let mut events = event_bus.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            tracing::debug!(event = ?event, "Domain event");
        }
    });

    // ── Services ─────────────────────────────────────────────────
    let authorizer = Arc::new(OwnerAuthorizer::new(entry_store.clone()));
    let move_service = Arc::new(EntryMoveService::new(
        entry_store.clone(),
        authorizer,
        event_bus.clone(),
    ));

    // ── HTTP server ──────────────────────────────────────────────
    let jwt_decoder = Arc::new(drivebox_api::auth::JwtDecoder::new(&config.auth));

    let state = drivebox_api::state::AppState {
        config: Arc::new(config.clone()),
        jwt_decoder,
        entry_store,
        move_service,
    };

    let app = drivebox_api::router::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("DriveBox server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    db.close().await;
    tracing::info!("DriveBox server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
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
}
