use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Immutable safety configuration loaded at startup and shared by reference.
/// The defaults are the curated production values; a TOML file can override
/// them per deployment. Never mutated at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyConfig {
    /// Full lexicon used when screening creative submissions.
    pub unsafe_terms: Vec<String>,
    /// Smaller subset scanned on every content event; tuned for chat-style
    /// text where the full lexicon would be too noisy.
    pub risky_terms: Vec<String>,
    /// Trailing-24h screen time above which a SCREEN_TIME alert fires.
    pub screen_time_ceiling_minutes: f64,
    /// How far back the monitoring summary looks.
    pub summary_window_days: i64,
    /// Number of rows returned by the leaderboard.
    pub leaderboard_limit: i64,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        let unsafe_terms = [
            // Violence
            "kill", "murder", "die", "death", "blood", "weapon", "gun", "knife", "fight", "hit",
            "punch", "kick",
            // Profanity
            "damn", "hell", "crap", "stupid", "idiot", "moron", "dumb", "fuck", "shit", "ass",
            "bitch",
            // Bullying language
            "hate", "loser", "bully", "hurt", "ugly", "fat", "weird", "freak", "nerd", "geek",
            // Substances
            "drug", "alcohol", "beer", "wine", "drunk", "high", "smoke",
            // Phrases
            "shut up", "shutup", "shut-up", "shut your mouth",
        ];
        let risky_terms = ["hate", "stupid", "loser", "bully", "hurt"];

        Self {
            unsafe_terms: unsafe_terms.iter().map(|s| s.to_string()).collect(),
            risky_terms: risky_terms.iter().map(|s| s.to_string()).collect(),
            screen_time_ceiling_minutes: 120.0,
            summary_window_days: 7,
            leaderboard_limit: 20,
        }
    }
}

impl SafetyConfig {
    /// Loads overrides from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let overrides: SafetyConfigOverrides = toml::from_str(&contents)?;

        let mut config = Self::default();
        if let Some(terms) = overrides.unsafe_terms {
            config.unsafe_terms = terms;
        }
        if let Some(terms) = overrides.risky_terms {
            config.risky_terms = terms;
        }
        if let Some(ceiling) = overrides.screen_time_ceiling_minutes {
            config.screen_time_ceiling_minutes = ceiling;
        }
        if let Some(days) = overrides.summary_window_days {
            config.summary_window_days = days;
        }
        if let Some(limit) = overrides.leaderboard_limit {
            config.leaderboard_limit = limit;
        }

        Ok(config)
    }
}

#[derive(Debug, Default, Deserialize)]
struct SafetyConfigOverrides {
    unsafe_terms: Option<Vec<String>>,
    risky_terms: Option<Vec<String>>,
    screen_time_ceiling_minutes: Option<f64>,
    summary_window_days: Option<i64>,
    leaderboard_limit: Option<i64>,
}
