use async_trait::async_trait;
use models::{InternRecord, NewIntern};
use tokio::sync::RwLock;

use super::repository::{append_intern, find_email, InternRepository};
use crate::errors::ServiceError;

/// Process-wide intern list. Signups are kept until the process exits.
#[derive(Default)]
pub struct MemoryInternRepository {
    interns: RwLock<Vec<InternRecord>>,
}

impl MemoryInternRepository {
    pub fn new(seed: Vec<InternRecord>) -> Self {
        Self { interns: RwLock::new(seed) }
    }
}

#[async_trait]
impl InternRepository for MemoryInternRepository {
    async fn list(&self) -> Result<Vec<InternRecord>, ServiceError> {
        Ok(self.interns.read().await.clone())
    }

    async fn find_by_id(&self, id: u32) -> Result<Option<InternRecord>, ServiceError> {
        Ok(self.interns.read().await.iter().find(|i| i.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<InternRecord>, ServiceError> {
        Ok(find_email(&self.interns.read().await, email).cloned())
    }

    async fn insert(&self, new: NewIntern) -> Result<InternRecord, ServiceError> {
        let mut interns = self.interns.write().await;
        append_intern(&mut interns, new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::seed::demo_interns;

    #[tokio::test]
    async fn memory_repository_lookup_and_insert() -> Result<(), anyhow::Error> {
        let repo = MemoryInternRepository::new(demo_interns());
        assert_eq!(repo.list().await?.len(), 6);
        assert_eq!(repo.find_by_id(2).await?.map(|i| i.name), Some("Priya Sharma".to_string()));
        assert!(repo.find_by_id(99).await?.is_none());
        assert!(repo.find_by_email("Marcus@Example.com").await?.is_some());

        let created = repo
            .insert(NewIntern {
                name: "Jo".into(),
                email: "jo@example.com".into(),
                referral_code: "jo2025".into(),
                password_hash: None,
            })
            .await?;
        assert_eq!(repo.find_by_id(created.id).await?, Some(created));
        Ok(())
    }
}
