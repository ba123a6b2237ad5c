//! Errors raised while loading catalog data or configuration.
//!
//! Wrong matches are a game concept, not an error; nothing here is produced
//! during play.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("word id {id} appears in both '{first}' and '{second}'")]
    DuplicateWordId { id: u32, first: String, second: String },

    #[error("level '{name}' has no words")]
    EmptyLevel { name: String },

    #[error("level name '{name}' is reserved for the review level")]
    ReservedName { name: String },

    #[error("review level already appended")]
    ReviewAlreadyPresent,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("review size must be at least 1")]
    ZeroReviewSize,
}
