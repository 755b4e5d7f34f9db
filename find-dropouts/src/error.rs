//! Error module
//!

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Status {
    #[error("Invalid date {0}, use YYYY-MM-DD")]
    BadDate(String),
    #[error("No date for snapshots in {0}, use --date or set it in the configuration")]
    NoDate(String),
    #[error("{0} is not a directory")]
    NotADirectory(String),
    #[error("Threshold must be positive, got {0}")]
    BadThreshold(f64),
}
