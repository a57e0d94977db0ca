mod config;

use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use scan2share_api::AppStore;
use scan2share_db::{Database, SnapshotStore};
use scan2share_store::{Clock, Persistence, Store, SystemClock};

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scan2share=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;

    // Init database and load the persisted snapshot
    let db = Arc::new(Database::open(&config.db_path)?);
    let persistence: Arc<dyn Persistence> =
        Arc::new(SnapshotStore::new(db, config.storage_key.clone()));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let store: AppStore = Store::open(persistence, clock);

    let app = scan2share_api::router(scan2share_api::shared(store))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = config.addr()?;
    info!("Scan2Share listening on {} (storage key {})", addr, config.storage_key);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
                }
            }
            Err(_) => {
                ctrl_c.await.ok();
                info!("Received Ctrl+C, shutting down...");
            }
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
