//! dishgrid-server — national dish cards, pre-rendered per grid layout.
//!
//! Startup: config → bundled dataset → content cache (8 layouts) → pages →
//! bind. Requests only read the prebuilt state.

mod cache;
mod config;
mod dispatch;
mod error;
mod ordering;
mod records;
mod server;
mod view;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{env_flag, Config};
use crate::records::RecordStore;
use crate::view::HtmlPresenter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env().context("invalid configuration")?;
    let records = RecordStore::embedded().context("failed to load bundled dataset")?;
    info!(
        records = records.len(),
        displayable = records.displayable_count(),
        ordering = %config.ordering,
        "records ready"
    );
    if records.is_empty() {
        warn!("bundled dataset has no usable rows, every layout will be empty");
    }

    if !config.static_dir.is_dir() {
        warn!(dir = %config.static_dir.display(), "static directory missing, /static will 404");
    }

    let state = Arc::new(server::AppState::new(records, &config, &HtmlPresenter));
    let app = server::router(state, &config.static_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("http://localhost:{}", config.port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("shut down");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if env_flag("LOG_JSON") {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
