use crate::connection::Database;
use crate::error::{DbError, Result};
use crate::models::LeaderboardEntry;

pub struct LeaderboardQueries;

impl LeaderboardQueries {
    /// Per-child point totals across all children, highest first. The two
    /// point sources are summed in correlated subqueries so a child with
    /// many sessions and many achievements is never cross-multiplied.
    /// Ties break on child id ascending to keep the ordering stable.
    pub async fn top(
        db: &Database,
        age_group: Option<&str>,
        limit: i64,
    ) -> Result<Vec<LeaderboardEntry>> {
        let pool = db.pool()?;

        sqlx::query_as::<_, LeaderboardEntry>(
            r#"
            SELECT c.id, c.display_name, c.age_group,
                   COALESCE((SELECT SUM(a.points)
                             FROM child_achievements ca
                             JOIN achievements a ON a.id = ca.achievement_id
                             WHERE ca.child_id = c.id), 0)
                 + COALESCE((SELECT SUM(s.score)
                             FROM gameplay_sessions s
                             WHERE s.child_id = c.id
                               AND s.completed = 1
                               AND s.score IS NOT NULL), 0) AS points
            FROM children c
            WHERE ?1 IS NULL OR c.age_group = ?1
            ORDER BY points DESC, c.id ASC
            LIMIT ?2
            "#,
        )
        .bind(age_group)
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(DbError::Sqlx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::DatabaseConfig;
    use crate::models::{NewChild, NewGameplaySession};
    use crate::queries::{AchievementQueries, ChildQueries, GameplaySessionQueries};
    use tempfile::tempdir;

    async fn setup_test_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");

        let config =
            DatabaseConfig { path: db_path.to_str().unwrap().to_string(), encryption_key: None };

        let db = Database::new(config).await.unwrap();
        db.run_migrations().await.unwrap();
        (db, dir)
    }

    async fn add_completed_session(db: &Database, child_id: &str, score: i64) {
        let session = GameplaySessionQueries::create(
            db,
            NewGameplaySession::new(child_id.to_string(), "math-quest".to_string()),
        )
        .await
        .unwrap();
        GameplaySessionQueries::complete(db, &session.id, true, Some(score), None).await.unwrap();
    }

    #[tokio::test]
    async fn test_leaderboard_orders_by_points() {
        let (db, _dir) = setup_test_db().await;

        let alice = ChildQueries::create(&db, NewChild::new("Alice".into(), "8-12".into()))
            .await
            .unwrap();
        let ben =
            ChildQueries::create(&db, NewChild::new("Ben".into(), "8-12".into())).await.unwrap();

        add_completed_session(&db, &alice.id, 50).await;
        add_completed_session(&db, &ben.id, 90).await;

        let board = LeaderboardQueries::top(&db, None, 20).await.unwrap();
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].display_name, "Ben");
        assert_eq!(board[0].points, 90);
        assert_eq!(board[1].points, 50);
    }

    #[tokio::test]
    async fn test_leaderboard_combines_both_point_sources() {
        let (db, _dir) = setup_test_db().await;

        let alice = ChildQueries::create(&db, NewChild::new("Alice".into(), "8-12".into()))
            .await
            .unwrap();

        add_completed_session(&db, &alice.id, 30).await;
        add_completed_session(&db, &alice.id, 20).await;

        let focus_hero = AchievementQueries::get_by_code(&db, "FOCUS_HERO").await.unwrap().unwrap();
        AchievementQueries::grant(&db, &alice.id, &focus_hero.id).await.unwrap();

        let board = LeaderboardQueries::top(&db, None, 20).await.unwrap();
        assert_eq!(board[0].points, 30 + 20 + 50);
    }

    #[tokio::test]
    async fn test_leaderboard_age_group_filter() {
        let (db, _dir) = setup_test_db().await;

        let young =
            ChildQueries::create(&db, NewChild::new("Young".into(), "5-7".into())).await.unwrap();
        ChildQueries::create(&db, NewChild::new("Teen".into(), "13-17".into())).await.unwrap();

        let board = LeaderboardQueries::top(&db, Some("5-7"), 20).await.unwrap();
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].id, young.id);
    }

    #[tokio::test]
    async fn test_leaderboard_truncates_to_limit() {
        let (db, _dir) = setup_test_db().await;

        for i in 0..5 {
            ChildQueries::create(&db, NewChild::new(format!("Child{i}"), "8-12".into()))
                .await
                .unwrap();
        }

        let board = LeaderboardQueries::top(&db, None, 3).await.unwrap();
        assert_eq!(board.len(), 3);
    }
}
