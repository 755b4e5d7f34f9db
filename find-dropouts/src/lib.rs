//! Library part of the `find-dropouts` driver.
//!
//! Replays a day of readsb-hist snapshots through `dropouts-tracker` and reports every gap in
//! ADS-B coverage.
//!

pub use cli::*;
pub use config::*;
pub use error::*;
pub use report::*;
pub use scan::*;
pub use source::*;

mod cli;
mod config;
mod error;
mod report;
mod scan;
mod source;
