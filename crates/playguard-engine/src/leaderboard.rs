use crate::error::Result;
use playguard_common::{AgeGroup, SafetyConfig};
use playguard_db::queries::LeaderboardQueries;
use playguard_db::{Database, LeaderboardEntry};
use std::sync::Arc;

/// Read-only ranking over the reward data. Owns no state; every call is a
/// fresh aggregate over the same sources `RewardEngine::total_points` reads.
pub struct RankingView {
    db: Arc<Database>,
    config: Arc<SafetyConfig>,
}

impl RankingView {
    pub fn new(db: Arc<Database>, config: Arc<SafetyConfig>) -> Self {
        Self { db, config }
    }

    pub async fn leaderboard(&self, age_group: Option<AgeGroup>) -> Result<Vec<LeaderboardEntry>> {
        let entries = LeaderboardQueries::top(
            &self.db,
            age_group.map(|group| group.as_str()),
            self.config.leaderboard_limit,
        )
        .await?;

        Ok(entries)
    }
}
