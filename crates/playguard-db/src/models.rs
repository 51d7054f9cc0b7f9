use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbChild {
    pub id: String,
    pub display_name: String,
    pub age_group: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewChild {
    pub id: String,
    pub display_name: String,
    pub age_group: String,
}

impl NewChild {
    pub fn new(display_name: String, age_group: String) -> Self {
        Self { id: Uuid::new_v4().to_string(), display_name, age_group }
    }
}

/// One span of a child consuming or producing content. Created open
/// (`ended_at` null), closed exactly once, never deleted.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbContentEvent {
    pub id: String,
    pub child_id: String,
    pub content_kind: String,
    pub reference_id: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub raw_text: Option<String>,
    pub labels: Option<String>, // JSON array
}

impl DbContentEvent {
    pub fn is_open(&self) -> bool {
        self.ended_at.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewContentEvent {
    pub id: String,
    pub child_id: String,
    pub content_kind: String,
    pub reference_id: String,
    pub raw_text: Option<String>,
    pub labels: Option<String>,
}

impl NewContentEvent {
    pub fn new(child_id: String, content_kind: String, reference_id: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            child_id,
            content_kind,
            reference_id,
            raw_text: None,
            labels: None,
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbAlert {
    pub id: String,
    pub child_id: String,
    pub alert_type: String,
    pub severity: String,
    pub message: String,
    pub generated_at: DateTime<Utc>,
    pub resolved: bool,
    pub resolved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAlert {
    pub id: String,
    pub child_id: String,
    pub alert_type: String,
    pub severity: String,
    pub message: String,
}

impl NewAlert {
    pub fn new(child_id: String, alert_type: String, severity: String, message: String) -> Self {
        Self { id: Uuid::new_v4().to_string(), child_id, alert_type, severity, message }
    }
}

/// Achievement definition. Seed data, read-only to the engine.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbAchievement {
    pub id: String,
    pub code: String,
    pub name: String,
    pub description: String,
    pub points: i64,
}

/// One child's one-time earning of an achievement, joined with its
/// definition for presentation.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbChildAchievement {
    pub child_id: String,
    pub achievement_id: String,
    pub awarded_at: DateTime<Utc>,
    pub code: String,
    pub name: String,
    pub description: String,
    pub points: i64,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbGameplaySession {
    pub id: String,
    pub child_id: String,
    pub game_id: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub completed: bool,
    pub score: Option<i64>,
    pub metadata: Option<String>, // JSON object
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGameplaySession {
    pub id: String,
    pub child_id: String,
    pub game_id: String,
}

impl NewGameplaySession {
    pub fn new(child_id: String, game_id: String) -> Self {
        Self { id: Uuid::new_v4().to_string(), child_id, game_id }
    }
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbCreation {
    pub id: String,
    pub child_id: String,
    pub title: String,
    pub creation_kind: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCreation {
    pub id: String,
    pub child_id: String,
    pub title: String,
    pub creation_kind: String,
    pub content: String,
}

impl NewCreation {
    pub fn new(child_id: String, title: String, creation_kind: String, content: String) -> Self {
        Self { id: Uuid::new_v4().to_string(), child_id, title, creation_kind, content }
    }
}

/// Fractional minutes accumulated on one calendar day.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DayMinutes {
    pub day: NaiveDate,
    pub minutes: f64,
}

/// Fractional minutes accumulated for one content kind.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct KindMinutes {
    pub content_kind: String,
    pub minutes: f64,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: String,
    pub display_name: String,
    pub age_group: String,
    pub points: i64,
}
