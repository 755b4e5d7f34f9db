//! Module to load the JSON snapshots generated by readsb.
//!
//! A snapshot looks like this (most fields removed):
//!
//! ```json
//! {
//!   "now": 1646092800.000,
//!   "messages": 43110387,
//!   "aircraft": [
//!     { "hex": "a4d5bb", "type": "adsb_icao", "flight": "N413EM  ", "r": "N413EM",
//!       "t": "C172", "dbFlags": 0, "alt_baro": 2350, "alt_geom": 2475,
//!       "lat": 39.703079, "lon": -104.849091, "seen": 0.1 }
//!   ]
//! }
//! ```
//!
//! `alt_baro` is either a number in feet or the string `"ground"`.  `lastPosition` is only present
//! when the position has not been refreshed recently and readsb resends the last known one.
//!

use std::fmt;
use std::io::Read;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use crate::{DbFlags, Result};

/// Marker used by readsb for aircraft on the ground.
///
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Ground {
    Ground,
}

/// Altitude as reported, either in feet or the "on ground" marker.
///
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Altitude {
    Feet(f64),
    Ground(Ground),
}

impl fmt::Display for Altitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Altitude::Feet(alt) => write!(f, "{alt}ft"),
            Altitude::Ground(_) => write!(f, "ground"),
        }
    }
}

/// One aircraft state inside a snapshot.
///
/// Every field is optional in the JSON, policy for missing ones is left to the consumer.
///
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct AircraftUpdate {
    /// ICAO 24-bit address, hex-encoded (a `~` prefix means non-ICAO)
    pub hex: Option<String>,
    /// Source of the current data, see `MessageType`
    #[serde(rename = "type")]
    pub msg_type: Option<String>,
    /// Call-sign, space padded
    pub flight: Option<String>,
    /// Registration from the database
    #[serde(rename = "r")]
    pub registration: Option<String>,
    /// Aircraft model (ICAO type designator) from the database
    #[serde(rename = "t")]
    pub model: Option<String>,
    /// Database flags
    #[serde(rename = "dbFlags", default)]
    pub db_flags: u32,
    /// Barometric altitude
    pub alt_baro: Option<Altitude>,
    /// Geometric (GNSS/INS) altitude
    pub alt_geom: Option<Altitude>,
    /// Latitude in degrees
    pub lat: Option<f64>,
    /// Longitude in degrees
    pub lon: Option<f64>,
    /// Seconds since any message was last received from this aircraft
    pub seen: Option<f64>,
    /// Last known position, resent when the current one is too old
    #[serde(rename = "lastPosition")]
    pub last_position: Option<Value>,
}

impl AircraftUpdate {
    /// Barometric altitude if present, geometric otherwise.
    ///
    #[inline]
    pub fn altitude(&self) -> Option<Altitude> {
        self.alt_baro.or(self.alt_geom)
    }

    #[inline]
    pub fn flags(&self) -> DbFlags {
        DbFlags::from(self.db_flags)
    }

    /// Is `lastPosition` set to anything meaningful?
    ///
    pub fn has_last_position(&self) -> bool {
        match &self.last_position {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(a)) => !a.is_empty(),
            Some(Value::Object(o)) => !o.is_empty(),
        }
    }
}

/// A full snapshot, as stored in one file.
///
#[derive(Debug, Default, Deserialize)]
pub struct Snapshot {
    /// Time of the snapshot as seen by readsb (UNIX epoch, fractional)
    pub now: Option<f64>,
    /// Total number of messages received
    pub messages: Option<u64>,
    /// All aircraft states
    #[serde(default)]
    pub aircraft: Vec<AircraftUpdate>,
}

impl Snapshot {
    /// Deserialize from json
    ///
    #[tracing::instrument(skip(input))]
    pub fn from_json(input: &str) -> Result<Self> {
        let data: Snapshot = serde_json::from_str(input)?;
        trace!("{} aircraft", data.aircraft.len());
        Ok(data)
    }

    /// Deserialize from any reader, uncompressed
    ///
    #[tracing::instrument(skip(rdr))]
    pub fn from_reader<R: Read>(rdr: R) -> Result<Self> {
        let data: Snapshot = serde_json::from_reader(rdr)?;
        trace!("{} aircraft", data.aircraft.len());
        Ok(data)
    }

    pub fn len(&self) -> usize {
        self.aircraft.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aircraft.is_empty()
    }
}
