/// Main application: believer roster management service
///
/// Architecture:
/// - axum router over a shared record store injected through AppState
/// - Duplicate screening is a pure read+compute per request (namematch crate)
/// - Rank taxonomy is seeded at startup when the store has none
///
/// No background workers, no outbound integrations; every request is served
/// from process-local state.

use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use tindo_roster::config::Settings;
use tindo_roster::services::store::RecordStore;
use tindo_roster::services::MemoryStore;
use tindo_roster::utils::logging::*;
use tindo_roster::{app_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env when present; in production the variables come from the
    // process environment.
    if dotenvy::dotenv().is_err() {
        tracing::debug!("no .env file found - using process environment");
    }

    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let settings = Settings::new()
        .map_err(|e| anyhow::anyhow!("failed to load settings: {}", e))?;

    log_config_loaded(&std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string()));

    // Record store: constructed once, injected everywhere
    let store: Arc<dyn RecordStore> = Arc::new(MemoryStore::new());

    if settings.roster.seed_default_ranks {
        match store.seed_default_ranks() {
            Ok(created) if created > 0 => log_ranks_seeded(created),
            Ok(_) => log_info("Rank taxonomy already present - nothing seeded"),
            Err(e) => log_warning(&format!("Failed to seed default ranks: {}", e)),
        }
    }

    let state = Arc::new(AppState {
        settings: settings.clone(),
        store,
    });

    // CORS is open: the roster UI is a separate origin in every deployment.
    let app = app_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // PORT from the environment wins over the configured port.
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(settings.server.port);
    let listener = TcpListener::bind(format!("{}:{}", settings.server.host, port)).await?;

    log_server_startup(port);
    log_server_ready(port);

    // Graceful shutdown with signal handling
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log_info("🛑 Server shut down gracefully");
    Ok(())
}

/// Signal handler for graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            log_info("🛑 Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            log_info("🛑 Received SIGTERM, shutting down gracefully...");
        }
    }
}
