use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use parkade_api::{app, worker, AppState};
use parkade_core::KvStore;
use parkade_store::app_config::{Config, StorageBackend};
use parkade_store::{InMemoryKvStore, RedisKvStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parkade_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Parkade API on port {}", config.server.port);

    let kv: Arc<dyn KvStore> = match config.storage.backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, state is lost on restart");
            Arc::new(InMemoryKvStore::new())
        }
        StorageBackend::Redis => {
            let store = RedisKvStore::new(&config.redis.url).context("Invalid Redis URL")?;
            Arc::new(store)
        }
    };

    let state = AppState::new(kv, &config);
    if state.services.catalog.ensure_seeded().await? {
        tracing::info!("Seeded parking catalog");
    }

    let sweeper = worker::spawn_expiry_sweeper(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.abort();
    tracing::info!("Parkade API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
