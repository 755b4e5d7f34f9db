//! A single validated observation and distances between them.
//!

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use dropouts_formats::{Altitude, MessageType};

use crate::{Result, TrackError, MEAN_EARTH_RADIUS_METERS};

/// Immutable snapshot of one valid report.
///
#[derive(Clone, Debug, PartialEq)]
pub struct Position {
    /// Observation time
    time: DateTime<Utc>,
    /// Latitude in degrees
    lat: f64,
    /// Longitude in degrees
    lon: f64,
    /// Barometric or geometric altitude, if any
    alt: Option<Altitude>,
    /// Where did the data come from
    kind: MessageType,
}

impl Position {
    /// Create a position, `kind` must be one of the known message types.
    ///
    pub fn new(
        time: DateTime<Utc>,
        lat: f64,
        lon: f64,
        alt: Option<Altitude>,
        kind: Option<&str>,
    ) -> Result<Self> {
        let kind = kind.ok_or(TrackError::MissingMessageType)?;
        let kind = MessageType::from_str(kind)
            .map_err(|_| TrackError::UnknownMessageType(kind.to_string()))?;

        Ok(Position {
            time,
            lat,
            lon,
            alt,
            kind,
        })
    }

    #[inline]
    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    #[inline]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    #[inline]
    pub fn lon(&self) -> f64 {
        self.lon
    }

    #[inline]
    pub fn alt(&self) -> Option<Altitude> {
        self.alt
    }

    #[inline]
    pub fn kind(&self) -> MessageType {
        self.kind
    }

    /// Great-circle distance to `other` in meters.
    ///
    #[inline]
    pub fn distance_to(&self, other: &Position) -> f64 {
        great_circle(self, other)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let alt = match self.alt {
            Some(alt) => alt.to_string(),
            None => "unknown".to_string(),
        };
        write!(
            f,
            "{} Latitude: {}, Longitude: {}, Altitude: {} ({})",
            self.time.format("%Y-%m-%dT%H:%M:%SZ"),
            self.lat,
            self.lon,
            alt,
            self.kind
        )
    }
}

/// Distance in meters between two positions on a spherical Earth.
///
pub fn great_circle(from: &Position, to: &Position) -> f64 {
    great_circle_deg(from.lat, from.lon, to.lat, to.lon)
}

/// Spherical law of cosines on degrees.
///
/// NOTE: the longitude difference is not wrapped around the antimeridian, only its cosine is
/// used and that is periodic so the result is the same.
///
pub fn great_circle_deg(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lon1) = (lat1.to_radians(), lon1.to_radians());
    let (lat2, lon2) = (lat2.to_radians(), lon2.to_radians());

    let dlon = (lon1 - lon2).abs();

    // Rounding can push the argument slightly outside of acos() domain.
    //
    let arg = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * dlon.cos();
    let angle = arg.clamp(-1., 1.).acos();

    MEAN_EARTH_RADIUS_METERS * angle
}
