//! Track reconstruction and coverage dropout detection.
//!
//! We fold an ordered stream of aircraft states into a `World`, keeping for every airframe (by
//! ICAO address) the current `Flight` and its last valid `Position`.  Whenever two consecutive
//! positions of the same flight are at least `threshold` seconds apart, a `Dropout` is recorded
//! with the great-circle distance between the LOS and AOS points.
//!
//! States must be fed in non-decreasing time order.
//!

pub use aircraft::*;
pub use dropout::*;
pub use error::*;
pub use flight::*;
pub use position::*;
pub use world::*;

mod aircraft;
mod dropout;
mod error;
mod flight;
mod position;
mod world;

/// Consider coverage lost if we have not gotten a position in this period (in seconds).
///
pub const DEF_THRESHOLD: f64 = 60.;

/// IUGG mean radius, see <https://en.wikipedia.org/wiki/Earth_radius#Published_values>
///
pub const MEAN_EARTH_RADIUS_METERS: f64 = 6_371_008.7714;

pub fn version() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
