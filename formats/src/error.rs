//! Error module
//!

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Invalid JSON snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FormatError>;
