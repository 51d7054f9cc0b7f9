use crate::connection::Database;
use crate::error::{DbError, Result};
use crate::models::{DbCreation, NewCreation};
use chrono::Utc;

pub struct CreationQueries;

impl CreationQueries {
    pub async fn create(db: &Database, creation: NewCreation) -> Result<DbCreation> {
        let pool = db.pool()?;

        sqlx::query(
            r#"
            INSERT INTO creations (id, child_id, title, creation_kind, content, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&creation.id)
        .bind(&creation.child_id)
        .bind(&creation.title)
        .bind(&creation.creation_kind)
        .bind(&creation.content)
        .bind(Utc::now())
        .execute(pool)
        .await?;

        Self::get_by_id(db, &creation.id).await
    }

    pub async fn get_by_id(db: &Database, id: &str) -> Result<DbCreation> {
        let pool = db.pool()?;

        sqlx::query_as::<_, DbCreation>("SELECT * FROM creations WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| DbError::NotFound(format!("Creation {} not found", id)))
    }

    pub async fn list_for_child(db: &Database, child_id: &str) -> Result<Vec<DbCreation>> {
        let pool = db.pool()?;

        sqlx::query_as::<_, DbCreation>(
            "SELECT * FROM creations WHERE child_id = ? ORDER BY created_at DESC",
        )
        .bind(child_id)
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
    async fn test_create_and_list_creations() {
        let (db, child_id, _dir) = setup_test_db().await;

        let creation = NewCreation::new(
            child_id.clone(),
            "My Castle".to_string(),
            "story".to_string(),
            "Once upon a time there was a big castle.".to_string(),
        );
        let created = CreationQueries::create(&db, creation).await.unwrap();
        assert_eq!(created.title, "My Castle");

        let listed = CreationQueries::list_for_child(&db, &child_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
    }
}
