// crates/addrdb-server/src/main.rs
use addrdb_core::{loader, PrefixIndex, RateLimiter, SearchService};
use addrdb_server::{create_router, AppState, ServerConfig};
use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real environment variables take precedence.
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,addrdb_server=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::parse();
    tracing::info!(mode = ?config.mode, "starting addrdb-server");

    let path = config.dataset_path();
    let entries = loader::load_from_path(&path)
        .with_context(|| format!("failed to load address dataset from {}", path.display()))?;

    let index = PrefixIndex::build_with(entries, config.index_options())
        .context("failed to index address dataset")?;
    let service = SearchService::with_max_results(index, config.max_results);
    let limiter =
        RateLimiter::in_memory(config.rate_limit()).context("invalid rate limit configuration")?;

    let state = AppState::new(Arc::new(service), limiter.clone(), &config);
    if !state.rate_limit_enabled() {
        tracing::info!("rate limiting disabled outside production");
    }
    let app = create_router(state, &config.api_prefix);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("listening on http://{addr}{}", config.api_prefix);

    let served = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await;

    limiter.shutdown();
    tracing::info!("addrdb-server stopped");
    served.context("server error")
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(e) => {
            tracing::error!("failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    }
}
