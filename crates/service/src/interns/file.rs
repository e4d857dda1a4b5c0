use std::path::PathBuf;

use async_trait::async_trait;
use models::{InternRecord, NewIntern};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::repository::{append_intern, find_email, InternRepository};
use crate::errors::ServiceError;
use crate::storage::json_document_store::JsonDocumentStore;

/// On-disk layout: `{ "interns": [ ... ] }`. Unknown top-level keys are ignored.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct InternDatabase {
    #[serde(default)]
    pub interns: Vec<InternRecord>,
}

/// Interns stored in a JSON file that is re-read on every call.
pub struct JsonFileInternRepository {
    store: JsonDocumentStore<InternDatabase>,
}

impl JsonFileInternRepository {
    /// Open `path`, creating it from `seed` when it does not exist.
    pub async fn open<P: Into<PathBuf>>(path: P, seed: Vec<InternRecord>) -> Result<Self, ServiceError> {
        let store = JsonDocumentStore::open(path, || InternDatabase { interns: seed }).await?;
        debug!(path = %store.path().display(), "intern data file ready");
        Ok(Self { store })
    }

    /// Read the interns from `path` once, without keeping a handle. Used to
    /// seed the memory backend.
    pub async fn load(path: &std::path::Path) -> Result<Vec<InternRecord>, ServiceError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ServiceError::Storage(format!("read {}: {e}", path.display())))?;
        let db: InternDatabase = serde_json::from_slice(&bytes)
            .map_err(|e| ServiceError::Storage(format!("parse {}: {e}", path.display())))?;
        Ok(db.interns)
    }
}

#[async_trait]
impl InternRepository for JsonFileInternRepository {
    async fn list(&self) -> Result<Vec<InternRecord>, ServiceError> {
        Ok(self.store.read().await?.interns)
    }

    async fn find_by_id(&self, id: u32) -> Result<Option<InternRecord>, ServiceError> {
        Ok(self.store.read().await?.interns.into_iter().find(|i| i.id == id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<InternRecord>, ServiceError> {
        let db = self.store.read().await?;
        Ok(find_email(&db.interns, email).cloned())
    }

    async fn insert(&self, new: NewIntern) -> Result<InternRecord, ServiceError> {
        self.store.update(|db| append_intern(&mut db.interns, new)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::seed::demo_interns;

    fn tmp_path() -> PathBuf {
        std::env::temp_dir().join(format!("intern_repo_{}/database.json", uuid::Uuid::new_v4()))
    }

    fn new_intern(email: &str) -> NewIntern {
        NewIntern {
            name: "File User".into(),
            email: email.into(),
            referral_code: "fileuser2025".into(),
            password_hash: Some("$argon2id$stub".into()),
        }
    }

    #[tokio::test]
    async fn file_repository_seeds_and_persists_inserts() -> Result<(), anyhow::Error> {
        let path = tmp_path();
        let repo = JsonFileInternRepository::open(&path, demo_interns()).await?;
        assert_eq!(repo.list().await?.len(), 6);

        let created = repo.insert(new_intern("file@example.com")).await?;
        assert_eq!(created.id, 7);

        let reopened = JsonFileInternRepository::open(&path, Vec::new()).await?;
        let found = reopened.find_by_email("FILE@example.com").await?.expect("persisted");
        assert_eq!(found.password_hash.as_deref(), Some("$argon2id$stub"));
        assert_eq!(JsonFileInternRepository::load(&path).await?.len(), 7);

        let dup = reopened.insert(new_intern("file@example.com")).await;
        assert!(matches!(dup, Err(ServiceError::Conflict(_))));

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }

    #[tokio::test]
    async fn file_repository_sees_external_edits() -> Result<(), anyhow::Error> {
        let path = tmp_path();
        let repo = JsonFileInternRepository::open(&path, demo_interns()).await?;
        tokio::fs::write(&path, r#"{"interns": [], "availableRewards": []}"#).await?;
        assert!(repo.list().await?.is_empty());
        assert!(repo.find_by_id(1).await?.is_none());

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }
}
