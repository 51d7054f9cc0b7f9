use crate::error::Result;
use playguard_db::queries::{AchievementQueries, GameplaySessionQueries};
use playguard_db::{
    Database, DbAchievement, DbChildAchievement, DbGameplaySession, NewGameplaySession,
};
use std::sync::Arc;
use tracing::{info, warn};

pub const CODE_FIRST_PLAY: &str = "FIRST_PLAY";
pub const CODE_HIGH_SCORE: &str = "HIGH_SCORE";
pub const CODE_FOCUS_HERO: &str = "FOCUS_HERO";

const HIGH_SCORE_THRESHOLD: i64 = 80;
const PERSISTENCE_SESSION_COUNT: i64 = 5;

/// Evaluates gameplay outcomes against the reward rules and grants
/// achievements at most once per child. All rules re-read current aggregates
/// at evaluation time and rely on the store's insert-if-absent grant, so
/// re-running them is always safe.
pub struct RewardEngine {
    db: Arc<Database>,
}

impl RewardEngine {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn start_session(
        &self,
        child_id: &str,
        game_id: &str,
    ) -> Result<DbGameplaySession> {
        let session = NewGameplaySession::new(child_id.to_string(), game_id.to_string());
        let created = GameplaySessionQueries::create(&self.db, session).await?;
        info!("Gameplay session started: {} for child {}", created.id, child_id);
        Ok(created)
    }

    /// Records a session outcome and, when the session completed, runs the
    /// reward rules against it.
    pub async fn complete_session(
        &self,
        id: &str,
        completed: bool,
        score: Option<i64>,
        metadata: Option<&serde_json::Value>,
    ) -> Result<DbGameplaySession> {
        let metadata_text = metadata.map(serde_json::to_string).transpose()?;

        let session = GameplaySessionQueries::complete(
            &self.db,
            id,
            completed,
            score,
            metadata_text.as_deref(),
        )
        .await?;
        info!("Gameplay session completed: {} (score {:?})", session.id, session.score);

        if session.completed {
            self.evaluate_session_outcome(&session).await?;
        }

        Ok(session)
    }

    /// The rules are independent and not mutually exclusive; a single
    /// session can trigger several of them.
    pub async fn evaluate_session_outcome(&self, session: &DbGameplaySession) -> Result<()> {
        let completed_count =
            GameplaySessionQueries::completed_count(&self.db, &session.child_id).await?;

        if completed_count == 1 {
            self.award_by_code(&session.child_id, CODE_FIRST_PLAY).await?;
        }

        if session.score.is_some_and(|score| score >= HIGH_SCORE_THRESHOLD) {
            self.award_by_code(&session.child_id, CODE_HIGH_SCORE).await?;
        }

        if completed_count >= PERSISTENCE_SESSION_COUNT {
            self.award_by_code(&session.child_id, CODE_FOCUS_HERO).await?;
        }

        Ok(())
    }

    /// Grants the achievement named by `code`, once. Unknown codes are a
    /// tolerant no-op so rules can reference achievements before their seed
    /// data ships. Returns whether this call created the grant.
    pub async fn award_by_code(&self, child_id: &str, code: &str) -> Result<bool> {
        let Some(achievement) = AchievementQueries::get_by_code(&self.db, code).await? else {
            warn!("Unknown achievement code '{}', ignoring", code);
            return Ok(false);
        };

        let granted = AchievementQueries::grant(&self.db, child_id, &achievement.id).await?;
        if granted {
            info!("Achievement {} awarded to child {}", code, child_id);
        }

        Ok(granted)
    }

    /// Discrete achievement points plus raw completed-session scores. Either
    /// source contributes zero when absent, never an error.
    pub async fn total_points(&self, child_id: &str) -> Result<i64> {
        let achievement_points =
            AchievementQueries::achievement_points(&self.db, child_id).await?;
        let session_points = GameplaySessionQueries::session_points(&self.db, child_id).await?;

        Ok(achievement_points + session_points)
    }

    pub async fn list_achievements(&self) -> Result<Vec<DbAchievement>> {
        let all = AchievementQueries::list_all(&self.db).await?;
        Ok(all)
    }

    pub async fn list_child_achievements(
        &self,
        child_id: &str,
    ) -> Result<Vec<DbChildAchievement>> {
        let granted = AchievementQueries::list_for_child(&self.db, child_id).await?;
        Ok(granted)
    }

    pub async fn list_sessions(
        &self,
        child_id: &str,
        limit: i64,
    ) -> Result<Vec<DbGameplaySession>> {
        let sessions = GameplaySessionQueries::list_for_child(&self.db, child_id, limit).await?;
        Ok(sessions)
    }
}
