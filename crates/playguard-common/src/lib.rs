pub mod config;
pub mod error;
pub mod types;

pub use config::SafetyConfig;
pub use error::{Error, Result};
pub use types::*;
