use std::{future::Future, path::Path};

use configs::AppConfig;
use dotenvy::dotenv;
use service::runtime;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use crate::state::AppState;

pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load configuration from `config.toml`/env and serve until Ctrl+C.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    let cfg = AppConfig::load_and_validate()?;
    run_with_config(cfg, shutdown_signal()).await
}

/// Build state and router from `cfg` and serve until `shutdown` resolves.
pub async fn run_with_config<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let frontend_dir = Path::new(&cfg.frontend.dir);
    let data_dir = Path::new(&cfg.storage.data_file).parent().unwrap_or_else(|| Path::new(""));
    runtime::ensure_env(frontend_dir, data_dir).await?;

    let state = AppState::from_config(&cfg).await?;
    let app = routes::build_router(state, build_cors(), frontend_dir);

    let listener = tokio::net::TcpListener::bind((cfg.server.host.as_str(), cfg.server.port)).await?;
    let addr = listener.local_addr()?;
    info!(%addr, backend = ?cfg.storage.backend, "intern portal listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("server stopped");
    Ok(())
}

/// Resolves on Ctrl+C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
}
