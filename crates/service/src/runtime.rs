//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` so the server crate can prepare its
//! directories through the service layer.

use std::path::Path;

/// Ensure the data directory exists; warn when the frontend directory is missing.
pub async fn ensure_env(frontend_dir: &Path, data_dir: &Path) -> anyhow::Result<()> {
    common::env::ensure_env(frontend_dir, data_dir).await
}
