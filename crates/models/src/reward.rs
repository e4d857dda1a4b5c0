//! Badge catalog and per-intern unlock evaluation.

use serde::{Deserialize, Serialize};

/// A badge an intern earns once their total donations reach `threshold`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    pub name: String,
    pub description: String,
    pub icon: String,
    pub threshold: f64,
}

impl Reward {
    pub fn new(name: &str, description: &str, icon: &str, threshold: f64) -> Self {
        Self { name: name.into(), description: description.into(), icon: icon.into(), threshold }
    }

    pub fn is_unlocked_by(&self, total_donations: f64) -> bool {
        total_donations >= self.threshold
    }
}

/// A catalog reward together with whether a particular intern has unlocked it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RewardStatus {
    #[serde(flatten)]
    pub reward: Reward,
    pub unlocked: bool,
}

/// Ordered set of rewards, lowest threshold first.
#[derive(Clone, Debug, PartialEq)]
pub struct RewardCatalog {
    rewards: Vec<Reward>,
}

impl RewardCatalog {
    pub fn new(mut rewards: Vec<Reward>) -> Self {
        rewards.sort_by(|a, b| a.threshold.total_cmp(&b.threshold));
        Self { rewards }
    }

    /// Bronze, Silver, Gold and Platinum tiers.
    pub fn standard() -> Self {
        Self::new(vec![
            Reward::new("Bronze Fundraiser", "Raised your first $1,000 for the cause", "🥉", 1000.0),
            Reward::new("Silver Fundraiser", "Crossed $2,000 in total donations", "🥈", 2000.0),
            Reward::new("Gold Fundraiser", "Brought in $5,000 from your network", "🥇", 5000.0),
            Reward::new("Platinum Champion", "Joined the $10,000 club", "🏆", 10000.0),
        ])
    }

    pub fn rewards(&self) -> &[Reward] {
        &self.rewards
    }

    /// Every catalog reward with its unlock flag for `total_donations`.
    pub fn evaluate(&self, total_donations: f64) -> Vec<RewardStatus> {
        self.rewards
            .iter()
            .map(|r| RewardStatus { reward: r.clone(), unlocked: r.is_unlocked_by(total_donations) })
            .collect()
    }

    pub fn unlocked_names(&self, total_donations: f64) -> Vec<String> {
        self.rewards
            .iter()
            .filter(|r| r.is_unlocked_by(total_donations))
            .map(|r| r.name.clone())
            .collect()
    }
}

impl Default for RewardCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
