use crate::connection::Database;
use crate::error::{DbError, Result};
use crate::models::{DayMinutes, DbContentEvent, KindMinutes, NewContentEvent};
use chrono::{DateTime, Utc};

pub struct ContentEventQueries;

impl ContentEventQueries {
    pub async fn create(db: &Database, event: NewContentEvent) -> Result<DbContentEvent> {
        let pool = db.pool()?;

        sqlx::query(
            r#"
            INSERT INTO content_events
            (id, child_id, content_kind, reference_id, started_at, raw_text, labels)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&event.id)
        .bind(&event.child_id)
        .bind(&event.content_kind)
        .bind(&event.reference_id)
        .bind(Utc::now())
        .bind(&event.raw_text)
        .bind(&event.labels)
        .execute(pool)
        .await?;

        Self::get_by_id(db, &event.id).await
    }

    pub async fn get_by_id(db: &Database, id: &str) -> Result<DbContentEvent> {
        let pool = db.pool()?;

        sqlx::query_as::<_, DbContentEvent>("SELECT * FROM content_events WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| DbError::NotFound(format!("Content event {} not found", id)))
    }

    /// Closes an event. `ended_at` is only written the first time; repeated
    /// calls keep the original timestamp. A supplied text replaces the stored
    /// one on every call, matching the completion contract.
    pub async fn close(
        db: &Database,
        id: &str,
        new_text: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<DbContentEvent> {
        let pool = db.pool()?;

        let result = sqlx::query(
            r#"
            UPDATE content_events
            SET ended_at = COALESCE(ended_at, ?), raw_text = COALESCE(?, raw_text)
            WHERE id = ?
            "#,
        )
        .bind(now)
        .bind(new_text)
        .bind(id)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            Err(DbError::NotFound(format!("Content event {} not found", id)))
        } else {
            Self::get_by_id(db, id).await
        }
    }

    /// Fractional minutes accumulated since `since`, with open events counted
    /// up to `now`. Never rounds; aggregation happens on raw elapsed time.
    pub async fn minutes_since(
        db: &Database,
        child_id: &str,
        since: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<f64> {
        let pool = db.pool()?;

        let minutes: f64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM((julianday(COALESCE(ended_at, ?1)) - julianday(started_at)) * 1440.0), 0.0)
            FROM content_events
            WHERE child_id = ?2 AND started_at >= ?3
            "#,
        )
        .bind(now)
        .bind(child_id)
        .bind(since)
        .fetch_one(pool)
        .await?;

        Ok(minutes)
    }

    pub async fn minutes_per_day_since(
        db: &Database,
        child_id: &str,
        since: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Vec<DayMinutes>> {
        let pool = db.pool()?;

        sqlx::query_as::<_, DayMinutes>(
            r#"
            SELECT date(started_at) AS day,
                   SUM((julianday(COALESCE(ended_at, ?1)) - julianday(started_at)) * 1440.0) AS minutes
            FROM content_events
            WHERE child_id = ?2 AND started_at >= ?3
            GROUP BY day
            ORDER BY day
            "#,
        )
        .bind(now)
        .bind(child_id)
        .bind(since)
        .fetch_all(pool)
        .await
        .map_err(DbError::Sqlx)
    }

    pub async fn minutes_per_kind_since(
        db: &Database,
        child_id: &str,
        since: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Vec<KindMinutes>> {
        let pool = db.pool()?;

        sqlx::query_as::<_, KindMinutes>(
            r#"
            SELECT content_kind,
                   SUM((julianday(COALESCE(ended_at, ?1)) - julianday(started_at)) * 1440.0) AS minutes
            FROM content_events
            WHERE child_id = ?2 AND started_at >= ?3
            GROUP BY content_kind
            ORDER BY content_kind
            "#,
        )
        .bind(now)
        .bind(child_id)
        .bind(since)
        .fetch_all(pool)
        .await
        .map_err(DbError::Sqlx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::DatabaseConfig;
    use crate::models::NewChild;
    use crate::queries::ChildQueries;
    use chrono::Duration;
    use tempfile::tempdir;

    async fn setup_test_db() -> (Database, String, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");

        let config =
            DatabaseConfig { path: db_path.to_str().unwrap().to_string(), encryption_key: None };

        let db = Database::new(config).await.unwrap();
        db.run_migrations().await.unwrap();

        let child = ChildQueries::create(&db, NewChild::new("Mika".to_string(), "8-12".to_string()))
            .await
            .unwrap();

        (db, child.id, dir)
    }

    #[tokio::test]
    async fn test_create_event_starts_open() {
        let (db, child_id, _dir) = setup_test_db().await;

        let mut event = NewContentEvent::new(child_id, "game".to_string(), "game-1".to_string());
        event.raw_text = Some("building a castle".to_string());

        let created = ContentEventQueries::create(&db, event).await.unwrap();
        assert!(created.is_open());
        assert_eq!(created.raw_text.as_deref(), Some("building a castle"));
    }

    #[tokio::test]
    async fn test_close_sets_ended_at_once() {
        let (db, child_id, _dir) = setup_test_db().await;

        let event = NewContentEvent::new(child_id, "video".to_string(), "vid-1".to_string());
        let created = ContentEventQueries::create(&db, event).await.unwrap();

        let first_close = Utc::now();
        let closed = ContentEventQueries::close(&db, &created.id, None, first_close).await.unwrap();
        assert_eq!(closed.ended_at, Some(first_close));
        assert!(closed.ended_at.unwrap() >= closed.started_at);

        // A later close keeps the original timestamp but still replaces text
        let later = first_close + Duration::minutes(10);
        let reclosed =
            ContentEventQueries::close(&db, &created.id, Some("new text"), later).await.unwrap();
        assert_eq!(reclosed.ended_at, Some(first_close));
        assert_eq!(reclosed.raw_text.as_deref(), Some("new text"));
    }

    #[tokio::test]
    async fn test_close_unknown_event() {
        let (db, _child_id, _dir) = setup_test_db().await;

        let result = ContentEventQueries::close(&db, "missing", None, Utc::now()).await;
        assert!(matches!(result, Err(DbError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_minutes_since_counts_open_events_to_now() {
        let (db, child_id, _dir) = setup_test_db().await;

        let event =
            NewContentEvent::new(child_id.clone(), "game".to_string(), "game-1".to_string());
        let created = ContentEventQueries::create(&db, event).await.unwrap();

        let now = created.started_at + Duration::minutes(30);
        let since = now - Duration::hours(24);

        let minutes = ContentEventQueries::minutes_since(&db, &child_id, since, now).await.unwrap();
        assert!((minutes - 30.0).abs() < 0.01, "expected ~30 minutes, got {minutes}");
    }

    #[tokio::test]
    async fn test_minutes_empty_without_events() {
        let (db, child_id, _dir) = setup_test_db().await;

        let now = Utc::now();
        let minutes = ContentEventQueries::minutes_since(&db, &child_id, now - Duration::days(7), now)
            .await
            .unwrap();
        assert_eq!(minutes, 0.0);

        let per_day =
            ContentEventQueries::minutes_per_day_since(&db, &child_id, now - Duration::days(7), now)
                .await
                .unwrap();
        assert!(per_day.is_empty());
    }
}
