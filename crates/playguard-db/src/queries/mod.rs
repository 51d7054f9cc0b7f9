pub mod achievements;
pub mod alerts;
pub mod children;
pub mod content_events;
pub mod creations;
pub mod leaderboard;
pub mod sessions;

pub use achievements::AchievementQueries;
pub use alerts::AlertQueries;
pub use children::ChildQueries;
pub use content_events::ContentEventQueries;
pub use creations::CreationQueries;
pub use leaderboard::LeaderboardQueries;
pub use sessions::GameplaySessionQueries;
