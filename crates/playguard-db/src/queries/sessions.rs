use crate::connection::Database;
use crate::error::{DbError, Result};
use crate::models::{DbGameplaySession, NewGameplaySession};
use chrono::Utc;

pub struct GameplaySessionQueries;

impl GameplaySessionQueries {
    pub async fn create(db: &Database, session: NewGameplaySession) -> Result<DbGameplaySession> {
        let pool = db.pool()?;

        sqlx::query(
            r#"
            INSERT INTO gameplay_sessions (id, child_id, game_id, started_at, completed)
            VALUES (?, ?, ?, ?, 0)
            "#,
        )
        .bind(&session.id)
        .bind(&session.child_id)
        .bind(&session.game_id)
        .bind(Utc::now())
        .execute(pool)
        .await?;

        Self::get_by_id(db, &session.id).await
    }

    pub async fn get_by_id(db: &Database, id: &str) -> Result<DbGameplaySession> {
        let pool = db.pool()?;

        sqlx::query_as::<_, DbGameplaySession>("SELECT * FROM gameplay_sessions WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| DbError::NotFound(format!("Session {} not found", id)))
    }

    pub async fn complete(
        db: &Database,
        id: &str,
        completed: bool,
        score: Option<i64>,
        metadata: Option<&str>,
    ) -> Result<DbGameplaySession> {
        let pool = db.pool()?;

        let result = sqlx::query(
            r#"
            UPDATE gameplay_sessions
            SET ended_at = ?, completed = ?, score = ?, metadata = COALESCE(?, metadata)
            WHERE id = ?
            "#,
        )
        .bind(Utc::now())
        .bind(completed)
        .bind(score)
        .bind(metadata)
        .bind(id)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            Err(DbError::NotFound(format!("Session {} not found", id)))
        } else {
            Self::get_by_id(db, id).await
        }
    }

    pub async fn completed_count(db: &Database, child_id: &str) -> Result<i64> {
        let pool = db.pool()?;

        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM gameplay_sessions WHERE child_id = ? AND completed = 1",
        )
        .bind(child_id)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// Sum of scores across completed, scored sessions. Unscored or
    /// incomplete sessions contribute nothing.
    pub async fn session_points(db: &Database, child_id: &str) -> Result<i64> {
        let pool = db.pool()?;

        let points: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(score), 0)
            FROM gameplay_sessions
            WHERE child_id = ? AND completed = 1 AND score IS NOT NULL
            "#,
        )
        .bind(child_id)
        .fetch_one(pool)
        .await?;

        Ok(points)
    }

    pub async fn list_for_child(
        db: &Database,
        child_id: &str,
        limit: i64,
    ) -> Result<Vec<DbGameplaySession>> {
        let pool = db.pool()?;

        sqlx::query_as::<_, DbGameplaySession>(
            "SELECT * FROM gameplay_sessions WHERE child_id = ? ORDER BY started_at DESC LIMIT ?",
        )
        .bind(child_id)
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(DbError::Sqlx)
    }
}
