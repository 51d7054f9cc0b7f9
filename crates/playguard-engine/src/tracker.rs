use crate::alerts::AlertService;
use crate::classifier::TextClassifier;
use crate::error::Result;
use chrono::{DateTime, Duration, Utc};
use playguard_common::{AlertType, ContentKind, SafetyConfig, Severity};
use playguard_db::queries::ContentEventQueries;
use playguard_db::{Database, DayMinutes, DbContentEvent, KindMinutes, NewContentEvent};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

const CYBERBULLYING_MESSAGE: &str =
    "We spotted some hurtful words. Take a moment to talk about kind language.";
const SCREEN_TIME_MESSAGE: &str =
    "Lots of fun today! Consider a movement break to stay balanced.";

/// Live snapshot of a child's recent usage. Minutes are fractional and open
/// events are counted up to the moment of the query, so repeated calls over
/// an open event give growing totals.
#[derive(Debug, Clone, Serialize)]
pub struct MonitoringSummary {
    pub total_minutes: f64,
    pub per_day: Vec<DayMinutes>,
    pub per_kind: Vec<KindMinutes>,
}

/// Records content-consumption spans, screens their text for risky
/// language, and watches cumulative screen time. Alerting here is always
/// auxiliary: events are recorded even when their text is flagged, and an
/// alert-write failure never fails the event operation.
pub struct ActivityTracker {
    db: Arc<Database>,
    classifier: TextClassifier,
    alerts: AlertService,
    config: Arc<SafetyConfig>,
}

impl ActivityTracker {
    pub fn new(db: Arc<Database>, config: Arc<SafetyConfig>) -> Result<Self> {
        let classifier = TextClassifier::new(&config.risky_terms)?;
        let alerts = AlertService::new(db.clone());
        Ok(Self { db, classifier, alerts, config })
    }

    pub async fn start_event(
        &self,
        child_id: &str,
        kind: ContentKind,
        reference_id: &str,
        raw_text: Option<&str>,
        labels: Option<&[String]>,
    ) -> Result<DbContentEvent> {
        let mut event =
            NewContentEvent::new(child_id.to_string(), kind.as_str().to_string(), reference_id.to_string());
        event.raw_text = raw_text.map(str::to_string);
        event.labels = labels.map(serde_json::to_string).transpose()?;

        let created = ContentEventQueries::create(&self.db, event).await?;
        info!("Content event started: {} ({}) for child {}", created.id, kind.as_str(), child_id);

        self.scan_text(child_id, created.raw_text.as_deref()).await;

        Ok(created)
    }

    /// Closes an event and re-derives the child's trailing-24h screen time.
    /// Completing an already-closed event leaves its timestamps alone but
    /// still replaces supplied text and re-runs both safety checks.
    pub async fn complete_event(
        &self,
        id: &str,
        new_text: Option<&str>,
    ) -> Result<DbContentEvent> {
        let now = Utc::now();
        let event = ContentEventQueries::close(&self.db, id, new_text, now).await?;
        info!("Content event completed: {} for child {}", event.id, event.child_id);

        self.scan_text(&event.child_id, event.raw_text.as_deref()).await;
        self.check_screen_time(&event.child_id, now).await;

        Ok(event)
    }

    pub async fn summarize(&self, child_id: &str) -> Result<MonitoringSummary> {
        let now = Utc::now();
        let since = now - Duration::days(self.config.summary_window_days);

        let total_minutes =
            ContentEventQueries::minutes_since(&self.db, child_id, since, now).await?;
        let per_day =
            ContentEventQueries::minutes_per_day_since(&self.db, child_id, since, now).await?;
        let per_kind =
            ContentEventQueries::minutes_per_kind_since(&self.db, child_id, since, now).await?;

        Ok(MonitoringSummary { total_minutes, per_day, per_kind })
    }

    async fn scan_text(&self, child_id: &str, text: Option<&str>) {
        let result = self.classifier.classify(text);
        if result.flagged {
            warn!("Risky language detected for child {}: {:?}", child_id, result.terms);
            self.alerts
                .create_best_effort(
                    child_id,
                    &AlertType::PotentialCyberbullying,
                    Severity::Medium,
                    CYBERBULLYING_MESSAGE,
                )
                .await;
        }
    }

    /// Trailing-24h threshold check. Every crossing emits a fresh alert;
    /// suppression windows belong upstream if a product ever wants them.
    async fn check_screen_time(&self, child_id: &str, now: DateTime<Utc>) {
        let since = now - Duration::hours(24);

        match ContentEventQueries::minutes_since(&self.db, child_id, since, now).await {
            Ok(minutes) if minutes > self.config.screen_time_ceiling_minutes => {
                info!(
                    "Screen time ceiling exceeded for child {}: {:.1} minutes in 24h",
                    child_id, minutes
                );
                self.alerts
                    .create_best_effort(
                        child_id,
                        &AlertType::ScreenTime,
                        Severity::Low,
                        SCREEN_TIME_MESSAGE,
                    )
                    .await;
            }
            Ok(_) => {}
            Err(e) => warn!("Screen time check failed for child {}: {}", child_id, e),
        }
    }
}
