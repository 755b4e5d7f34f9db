//! One continuous leg of an aircraft.
//!

use chrono::{DateTime, Utc};
use tracing::{trace, warn};

use dropouts_formats::AircraftUpdate;

use crate::dropout::secs;
use crate::{Dropout, Position, Result};

/// A flight is approximated by the persistence of the call-sign.  We only keep the last valid
/// position, the only one needed to find gaps.
///
#[derive(Clone, Debug)]
pub struct Flight {
    /// ICAO address of the aircraft
    hex: String,
    /// Call-sign or its stand-in
    callsign: String,
    /// Gaps of this many seconds or more are dropouts
    threshold: f64,
    /// Most recent valid position
    last_position: Option<Position>,
    /// Number of valid positions seen
    positions: usize,
    /// Number of dropouts found
    dropouts: usize,
}

impl Flight {
    /// Create an empty flight.
    ///
    pub fn new(hex: &str, callsign: &str, threshold: f64) -> Self {
        Flight {
            hex: hex.to_owned(),
            callsign: callsign.to_owned(),
            threshold,
            last_position: None,
            positions: 0,
            dropouts: 0,
        }
    }

    /// Create a flight and feed it its first update.
    ///
    #[tracing::instrument(skip(update))]
    pub fn start(
        hex: &str,
        callsign: &str,
        threshold: f64,
        update: &AircraftUpdate,
        time: DateTime<Utc>,
    ) -> Result<Self> {
        let mut flight = Flight::new(hex, callsign, threshold);

        // No previous position so never a dropout.
        //
        let _ = flight.process_update(update, time)?;
        Ok(flight)
    }

    /// Ingest one update.  Updates without a usable position are ignored, a `Dropout` is
    /// returned if the gap with the previous position is at least `threshold` seconds.
    ///
    /// NOTE: a latitude or longitude of exactly 0.0 is considered missing.
    ///
    pub fn process_update(
        &mut self,
        update: &AircraftUpdate,
        time: DateTime<Utc>,
    ) -> Result<Option<Dropout>> {
        let (lat, lon) = match (update.lat, update.lon) {
            (Some(lat), Some(lon)) if lat != 0. && lon != 0. => (lat, lon),
            _ => {
                trace!(
                    "hex {}: Cowardly refusing to process updates with no position info",
                    self.hex
                );
                return Ok(None);
            }
        };

        let new_pos = Position::new(
            time,
            lat,
            lon,
            update.altitude(),
            update.msg_type.as_deref(),
        )?;
        self.positions += 1;

        let Some(last_pos) = self.last_position.replace(new_pos.clone()) else {
            return Ok(None);
        };

        let elapsed = secs(time - last_pos.time());
        if elapsed >= self.threshold {
            let dropout = Dropout::new(&self.hex, &self.callsign, last_pos, new_pos);
            warn!("{}", dropout);
            self.dropouts += 1;
            return Ok(Some(dropout));
        }
        Ok(None)
    }

    #[inline]
    pub fn callsign(&self) -> &str {
        &self.callsign
    }

    #[inline]
    pub fn last_position(&self) -> Option<&Position> {
        self.last_position.as_ref()
    }

    /// Number of valid positions accepted so far
    ///
    #[inline]
    pub fn positions(&self) -> usize {
        self.positions
    }

    #[inline]
    pub fn dropouts(&self) -> usize {
        self.dropouts
    }
}
