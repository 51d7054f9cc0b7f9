use crate::connection::Database;
use crate::error::{DbError, Result};
use crate::models::{DbAlert, NewAlert};
use chrono::Utc;

pub struct AlertQueries;

impl AlertQueries {
    pub async fn create(db: &Database, alert: NewAlert) -> Result<DbAlert> {
        let pool = db.pool()?;

        sqlx::query(
            r#"
            INSERT INTO alerts (id, child_id, alert_type, severity, message, generated_at, resolved)
            VALUES (?, ?, ?, ?, ?, ?, 0)
            "#,
        )
        .bind(&alert.id)
        .bind(&alert.child_id)
        .bind(&alert.alert_type)
        .bind(&alert.severity)
        .bind(&alert.message)
        .bind(Utc::now())
        .execute(pool)
        .await?;

        Self::get_by_id(db, &alert.id).await
    }

    pub async fn get_by_id(db: &Database, id: &str) -> Result<DbAlert> {
        let pool = db.pool()?;

        sqlx::query_as::<_, DbAlert>("SELECT * FROM alerts WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| DbError::NotFound(format!("Alert {} not found", id)))
    }

    pub async fn list_for_child(db: &Database, child_id: &str) -> Result<Vec<DbAlert>> {
        let pool = db.pool()?;

        sqlx::query_as::<_, DbAlert>(
            "SELECT * FROM alerts WHERE child_id = ? ORDER BY generated_at DESC",
        )
        .bind(child_id)
        .fetch_all(pool)
        .await
        .map_err(DbError::Sqlx)
    }

    /// Marks an alert resolved. The resolution timestamp of the first call
    /// wins; resolving an already-resolved alert leaves it untouched.
    pub async fn resolve(db: &Database, id: &str) -> Result<DbAlert> {
        let pool = db.pool()?;

        let result = sqlx::query(
            "UPDATE alerts SET resolved = 1, resolved_at = COALESCE(resolved_at, ?) WHERE id = ?",
        )
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            Err(DbError::NotFound(format!("Alert {} not found", id)))
        } else {
            Self::get_by_id(db, id).await
        }
    }
}
