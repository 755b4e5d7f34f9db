//! Definition of the input data format
//!
//! We read the JSON snapshots produced by [readsb] (and published as-is by [ADSBExchange] in
//! their `readsb-hist` archives).  Each snapshot is a list of aircraft states at a given time,
//! every field beside the ICAO address being optional.
//!
//! Only the fields we need are there, this is not a general readsb decoder.
//!
//! [readsb]: https://github.com/wiedehopf/readsb/blob/dev/README-json.md
//! [ADSBExchange]: https://www.adsbexchange.com/
//!

// Re-export for convenience
//
pub use error::*;
pub use flags::*;
pub use message::*;
pub use readsb::*;

mod error;
mod flags;
mod message;
mod readsb;

pub fn version() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
