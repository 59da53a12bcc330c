//! Error types for conjugation-core.

use thiserror::Error;

/// Result type alias using CardError.
pub type Result<T> = std::result::Result<T, CardError>;

/// Errors that can occur while reading a card record.
#[derive(Debug, Error)]
pub enum CardError {
    #[error("invalid card JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("card field `{field}` is empty")]
    MissingField { field: &'static str },
}

/// Errors from loading the tense→level table.
#[derive(Debug, Error)]
pub enum LevelLookupError {
    #[error("level table unavailable: {0}")]
    Unavailable(String),

    #[error("malformed level table: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Errors from placing the caret on a rendering surface.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CaretError {
    #[error("no text node at offset {offset}")]
    NoPosition { offset: usize },

    #[error("surface is detached")]
    Detached,
}
