pub mod alerts;
pub mod classifier;
pub mod creative;
pub mod error;
pub mod leaderboard;
pub mod rewards;
pub mod tracker;

pub use alerts::AlertService;
pub use classifier::{Classification, TextClassifier};
pub use creative::CreativeService;
pub use error::{EngineError, Result};
pub use leaderboard::RankingView;
pub use rewards::RewardEngine;
pub use tracker::{ActivityTracker, MonitoringSummary};

use playguard_common::SafetyConfig;
use playguard_db::Database;
use std::sync::Arc;

/// All engine services wired over one database pool and one immutable
/// safety configuration.
pub struct RuleEngine {
    pub alerts: AlertService,
    pub tracker: ActivityTracker,
    pub rewards: RewardEngine,
    pub ranking: RankingView,
    pub creative: CreativeService,
}

impl RuleEngine {
    pub fn new(db: Database, config: SafetyConfig) -> Result<Self> {
        let db = Arc::new(db);
        let config = Arc::new(config);

        Ok(Self {
            alerts: AlertService::new(db.clone()),
            tracker: ActivityTracker::new(db.clone(), config.clone())?,
            rewards: RewardEngine::new(db.clone()),
            ranking: RankingView::new(db.clone(), config.clone()),
            creative: CreativeService::new(db, &config)?,
        })
    }
}
