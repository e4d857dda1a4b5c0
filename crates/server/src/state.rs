use std::{path::Path, sync::Arc};

use configs::{AppConfig, StorageBackend};
use models::{seed, RewardCatalog};
use service::{
    auth::{AuthConfig, AuthService},
    interns::{InternRepository, InternService, JsonFileInternRepository, MemoryInternRepository},
};
use tracing::{info, warn};

/// Shared handler state; cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub interns: Arc<InternService>,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(repo: Arc<dyn InternRepository>, auth_cfg: AuthConfig) -> Self {
        Self {
            interns: Arc::new(InternService::new(Arc::clone(&repo), RewardCatalog::standard())),
            auth: Arc::new(AuthService::new(repo, auth_cfg)),
        }
    }

    /// Build the repository selected by `storage.backend`.
    pub async fn from_config(cfg: &AppConfig) -> anyhow::Result<Self> {
        let data_file = Path::new(&cfg.storage.data_file);
        let repo: Arc<dyn InternRepository> = match cfg.storage.backend {
            StorageBackend::File => Arc::new(JsonFileInternRepository::open(data_file, seed::demo_interns()).await?),
            StorageBackend::Memory => {
                let interns = if data_file.exists() {
                    JsonFileInternRepository::load(data_file).await?
                } else {
                    warn!(data_file = %data_file.display(), "data file missing; using built-in demo interns");
                    seed::demo_interns()
                };
                Arc::new(MemoryInternRepository::new(interns))
            }
        };
        info!(backend = ?cfg.storage.backend, data_file = %data_file.display(), "intern repository ready");

        let auth_cfg = AuthConfig {
            demo_password: cfg.auth.demo_password.clone(),
            min_password_len: cfg.auth.min_password_len,
        };
        Ok(Self::new(repo, auth_cfg))
    }
}
