use crate::error::Result;
use playguard_common::{AlertType, Severity};
use playguard_db::queries::AlertQueries;
use playguard_db::{Database, DbAlert, NewAlert};
use std::sync::Arc;
use tracing::{error, info};

/// Durable alert records for a child: create, list, resolve. There is no
/// de-duplication; each trigger occurrence is independently actionable, so
/// repeated identical conditions produce repeated rows.
#[derive(Clone)]
pub struct AlertService {
    db: Arc<Database>,
}

impl AlertService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        child_id: &str,
        alert_type: &AlertType,
        severity: Severity,
        message: &str,
    ) -> Result<DbAlert> {
        let alert = NewAlert::new(
            child_id.to_string(),
            alert_type.as_str().to_string(),
            severity.as_str().to_string(),
            message.to_string(),
        );

        let created = AlertQueries::create(&self.db, alert).await?;
        info!(
            "Alert created: {} ({}/{}) for child {}",
            created.id, created.alert_type, created.severity, child_id
        );

        Ok(created)
    }

    /// Creation variant for auxiliary triggers: the caller's primary
    /// operation must not fail because alerting did, so errors are logged
    /// and swallowed here.
    pub async fn create_best_effort(
        &self,
        child_id: &str,
        alert_type: &AlertType,
        severity: Severity,
        message: &str,
    ) {
        if let Err(e) = self.create(child_id, alert_type, severity, message).await {
            error!("Failed to create {} alert for child {}: {}", alert_type.as_str(), child_id, e);
        }
    }

    pub async fn list(&self, child_id: &str) -> Result<Vec<DbAlert>> {
        let alerts = AlertQueries::list_for_child(&self.db, child_id).await?;
        Ok(alerts)
    }

    pub async fn resolve(&self, id: &str) -> Result<DbAlert> {
        let alert = AlertQueries::resolve(&self.db, id).await?;
        info!("Alert resolved: {}", alert.id);
        Ok(alert)
    }
}
