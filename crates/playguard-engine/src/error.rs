use playguard_db::DbError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Database error: {0}")]
    Db(#[from] DbError),

    /// The one failure with a user-facing message of its own: a child's
    /// submission was rejected by the content policy. The triggering write
    /// is abandoned; everything else in the request already succeeded.
    #[error("Your content contains words that are not allowed. Please use kind and appropriate language.")]
    ContentBlocked { terms: Vec<String> },

    #[error("Invalid term pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EngineError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, EngineError::Db(DbError::NotFound(_)))
    }
}
