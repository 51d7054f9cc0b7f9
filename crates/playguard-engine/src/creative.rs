use crate::alerts::AlertService;
use crate::classifier::TextClassifier;
use crate::error::{EngineError, Result};
use playguard_common::{AlertType, SafetyConfig, Severity};
use playguard_db::queries::CreationQueries;
use playguard_db::{Database, DbCreation, NewCreation};
use std::sync::Arc;
use tracing::{info, warn};

/// Creative submissions are the one place where a flagged classification
/// blocks the triggering action itself: the save is rejected with a
/// child-friendly message. The guardian alert is still attempted, but its
/// failure never changes the rejection.
pub struct CreativeService {
    db: Arc<Database>,
    classifier: TextClassifier,
    alerts: AlertService,
}

impl CreativeService {
    pub fn new(db: Arc<Database>, config: &SafetyConfig) -> Result<Self> {
        let classifier = TextClassifier::new(&config.unsafe_terms)?;
        let alerts = AlertService::new(db.clone());
        Ok(Self { db, classifier, alerts })
    }

    pub async fn create_creation(
        &self,
        child_id: &str,
        title: &str,
        creation_kind: &str,
        content: &str,
    ) -> Result<DbCreation> {
        let result = self.classifier.classify_pair(Some(title), Some(content));

        if result.flagged {
            let terms: Vec<String> = result.terms.into_iter().collect();
            warn!("Blocked creation from child {}: detected {:?}", child_id, terms);

            let message = format!(
                "Your child attempted to save content containing inappropriate words: {}. \
                 The content was blocked.",
                terms.join(", ")
            );
            self.alerts
                .create_best_effort(
                    child_id,
                    &AlertType::InappropriateContent,
                    Severity::High,
                    &message,
                )
                .await;

            return Err(EngineError::ContentBlocked { terms });
        }

        let creation = NewCreation::new(
            child_id.to_string(),
            title.to_string(),
            creation_kind.to_string(),
            content.to_string(),
        );
        let created = CreationQueries::create(&self.db, creation).await?;
        info!("Creation saved: {} for child {}", created.id, child_id);

        Ok(created)
    }

    pub async fn list_creations(&self, child_id: &str) -> Result<Vec<DbCreation>> {
        let creations = CreationQueries::list_for_child(&self.db, child_id).await?;
        Ok(creations)
    }
}
