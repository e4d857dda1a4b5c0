pub mod errors;
pub mod intern;
pub mod reward;
pub mod seed;

pub use intern::{InternProfile, InternRecord, LeaderboardEntry, NewIntern};
pub use reward::{Reward, RewardCatalog, RewardStatus};
