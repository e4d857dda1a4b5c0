use std::sync::Arc;

use models::{intern, InternProfile, InternRecord, LeaderboardEntry, Reward, RewardCatalog};
use tracing::{debug, instrument};

use super::repository::InternRepository;
use crate::errors::ServiceError;

/// Read-side operations: ranked listings, single profiles and the reward catalog.
pub struct InternService {
    repo: Arc<dyn InternRepository>,
    catalog: RewardCatalog,
}

impl InternService {
    pub fn new(repo: Arc<dyn InternRepository>, catalog: RewardCatalog) -> Self {
        Self { repo, catalog }
    }

    pub fn rewards(&self) -> &[Reward] {
        self.catalog.rewards()
    }

    pub fn to_profile(&self, record: &InternRecord) -> InternProfile {
        InternProfile::from_record(record, &self.catalog)
    }

    /// All interns as profiles, highest total donations first.
    #[instrument(skip(self))]
    pub async fn ranked(&self) -> Result<Vec<InternProfile>, ServiceError> {
        let mut interns = self.repo.list().await?;
        intern::sort_by_donations(&mut interns);
        debug!(count = interns.len(), "ranked interns");
        Ok(interns.iter().map(|i| self.to_profile(i)).collect())
    }

    #[instrument(skip(self))]
    pub async fn profile(&self, id: u32) -> Result<InternProfile, ServiceError> {
        let record = self.repo.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("Intern"))?;
        Ok(self.to_profile(&record))
    }

    #[instrument(skip(self))]
    pub async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, ServiceError> {
        let interns = self.repo.list().await?;
        Ok(intern::leaderboard(interns, &self.catalog))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interns::MemoryInternRepository;
    use models::seed::demo_interns;

    fn service() -> InternService {
        InternService::new(Arc::new(MemoryInternRepository::new(demo_interns())), RewardCatalog::standard())
    }

    #[tokio::test]
    async fn ranked_is_sorted_descending() -> Result<(), anyhow::Error> {
        let ranked = service().ranked().await?;
        assert_eq!(ranked.len(), 6);
        assert!(ranked.windows(2).all(|w| w[0].total_donations >= w[1].total_donations));
        assert_eq!(ranked[0].name, "Alex Johnson");
        Ok(())
    }

    #[tokio::test]
    async fn profile_unknown_id_is_not_found() {
        assert!(matches!(service().profile(42).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn profile_rewards_follow_thresholds() -> Result<(), anyhow::Error> {
        // Sofia: 3400.25 -> Bronze and Silver only
        let p = service().profile(4).await?;
        let unlocked: Vec<&str> = p.rewards.iter().filter(|r| r.unlocked).map(|r| r.reward.name.as_str()).collect();
        assert_eq!(unlocked, vec!["Bronze Fundraiser", "Silver Fundraiser"]);
        assert_eq!(p.rewards.len(), 4);
        Ok(())
    }

    #[tokio::test]
    async fn leaderboard_ranks_start_at_one() -> Result<(), anyhow::Error> {
        let board = service().leaderboard().await?;
        assert_eq!(board.first().map(|e| e.rank), Some(1));
        assert_eq!(board.last().map(|e| e.rank), Some(6));
        assert_eq!(board[0].badges.len(), 4);
        Ok(())
    }
}
