use crate::connection::Database;
use crate::error::{DbError, Result};
use crate::models::{DbAchievement, DbChildAchievement};
use chrono::Utc;

pub struct AchievementQueries;

impl AchievementQueries {
    pub async fn list_all(db: &Database) -> Result<Vec<DbAchievement>> {
        let pool = db.pool()?;

        sqlx::query_as::<_, DbAchievement>("SELECT * FROM achievements ORDER BY points DESC")
            .fetch_all(pool)
            .await
            .map_err(DbError::Sqlx)
    }

    pub async fn get_by_code(db: &Database, code: &str) -> Result<Option<DbAchievement>> {
        let pool = db.pool()?;

        sqlx::query_as::<_, DbAchievement>("SELECT * FROM achievements WHERE code = ?")
            .bind(code)
            .fetch_optional(pool)
            .await
            .map_err(DbError::Sqlx)
    }

    /// Insert-if-absent grant. The composite primary key makes this atomic:
    /// among concurrent callers exactly one inserts, the rest observe a
    /// no-op. Returns whether this call inserted the row.
    pub async fn grant(db: &Database, child_id: &str, achievement_id: &str) -> Result<bool> {
        let pool = db.pool()?;

        let result = sqlx::query(
            r#"
            INSERT INTO child_achievements (child_id, achievement_id, awarded_at)
            VALUES (?, ?, ?)
            ON CONFLICT (child_id, achievement_id) DO NOTHING
            "#,
        )
        .bind(child_id)
        .bind(achievement_id)
        .bind(Utc::now())
        .execute(pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    pub async fn list_for_child(db: &Database, child_id: &str) -> Result<Vec<DbChildAchievement>> {
        let pool = db.pool()?;

        sqlx::query_as::<_, DbChildAchievement>(
            r#"
            SELECT ca.child_id, ca.achievement_id, ca.awarded_at,
                   a.code, a.name, a.description, a.points
            FROM child_achievements ca
            JOIN achievements a ON a.id = ca.achievement_id
            WHERE ca.child_id = ?
            ORDER BY ca.awarded_at DESC
            "#,
        )
        .bind(child_id)
        .fetch_all(pool)
        .await
        .map_err(DbError::Sqlx)
    }

    pub async fn achievement_points(db: &Database, child_id: &str) -> Result<i64> {
        let pool = db.pool()?;

        let points: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(a.points), 0)
            FROM child_achievements ca
            JOIN achievements a ON a.id = ca.achievement_id
            WHERE ca.child_id = ?
            "#,
        )
        .bind(child_id)
        .fetch_one(pool)
        .await?;

        Ok(points)
    }
}
