//! Error module
//!

use thiserror::Error;

/// Per-record failures, the caller decides whether to skip the record or abort.
///
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TrackError {
    #[error("Record has no hex address")]
    MissingHex,
    #[error("Record for {0} has no seen field")]
    MissingSeen(String),
    #[error("Record has no message type")]
    MissingMessageType,
    #[error("Unknown message type {0}")]
    UnknownMessageType(String),
}

pub type Result<T> = std::result::Result<T, TrackError>;
