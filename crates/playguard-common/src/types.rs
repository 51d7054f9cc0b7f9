use serde::{Deserialize, Serialize};

/// Age group classifications for children. The rule engine only references
/// these for leaderboard filtering; limits per group live in `SafetyConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeGroup {
    /// Ages 5-7: early elementary
    #[serde(rename = "5-7")]
    EarlyElementary,
    /// Ages 8-12: late elementary
    #[serde(rename = "8-12")]
    LateElementary,
    /// Ages 13-17: high school
    #[serde(rename = "13-17")]
    HighSchool,
}

impl AgeGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::EarlyElementary => "5-7",
            AgeGroup::LateElementary => "8-12",
            AgeGroup::HighSchool => "13-17",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "5-7" => Some(AgeGroup::EarlyElementary),
            "8-12" => Some(AgeGroup::LateElementary),
            "13-17" => Some(AgeGroup::HighSchool),
            _ => None,
        }
    }
}

/// What kind of content a tracked event covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Game,
    Video,
    Article,
    Chat,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Game => "game",
            ContentKind::Video => "video",
            ContentKind::Article => "article",
            ContentKind::Chat => "chat",
        }
    }
}

/// Category of a stored alert. New categories can be introduced without a
/// schema change since alerts persist the type as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertType {
    InappropriateContent,
    PotentialCyberbullying,
    ScreenTime,
    Other(String),
}

impl AlertType {
    pub fn as_str(&self) -> &str {
        match self {
            AlertType::InappropriateContent => "INAPPROPRIATE_CONTENT",
            AlertType::PotentialCyberbullying => "POTENTIAL_CYBERBULLYING",
            AlertType::ScreenTime => "SCREEN_TIME",
            AlertType::Other(s) => s,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "INAPPROPRIATE_CONTENT" => AlertType::InappropriateContent,
            "POTENTIAL_CYBERBULLYING" => AlertType::PotentialCyberbullying,
            "SCREEN_TIME" => AlertType::ScreenTime,
            other => AlertType::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
        }
    }
}
