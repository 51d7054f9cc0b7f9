use crate::connection::Database;
use crate::error::{DbError, Result};
use crate::models::{DbChild, NewChild};

pub struct ChildQueries;

impl ChildQueries {
    pub async fn create(db: &Database, child: NewChild) -> Result<DbChild> {
        let pool = db.pool()?;

        sqlx::query(
            r#"
            INSERT INTO children (id, display_name, age_group)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&child.id)
        .bind(&child.display_name)
        .bind(&child.age_group)
        .execute(pool)
        .await?;

        Self::get_by_id(db, &child.id).await
    }

    pub async fn get_by_id(db: &Database, id: &str) -> Result<DbChild> {
        let pool = db.pool()?;

        sqlx::query_as::<_, DbChild>("SELECT * FROM children WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| DbError::NotFound(format!("Child {} not found", id)))
    }

    pub async fn list_all(db: &Database) -> Result<Vec<DbChild>> {
        let pool = db.pool()?;

        sqlx::query_as::<_, DbChild>("SELECT * FROM children ORDER BY display_name")
            .fetch_all(pool)
            .await
            .map_err(DbError::Sqlx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::DatabaseConfig;
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

    #[tokio::test]
    async fn test_create_and_get_child() {
        let (db, _dir) = setup_test_db().await;

        let child = NewChild::new("Mika".to_string(), "8-12".to_string());
        let created = ChildQueries::create(&db, child).await.unwrap();

        assert_eq!(created.display_name, "Mika");
        assert_eq!(created.age_group, "8-12");

        let fetched = ChildQueries::get_by_id(&db, &created.id).await.unwrap();
        assert_eq!(fetched.id, created.id);
    }

    #[tokio::test]
    async fn test_get_unknown_child() {
        let (db, _dir) = setup_test_db().await;

        let result = ChildQueries::get_by_id(&db, "nope").await;
        assert!(matches!(result, Err(DbError::NotFound(_))));
    }
}
