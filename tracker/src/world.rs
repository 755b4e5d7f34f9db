//! The registry of all aircraft seen during a run.
//!

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use dropouts_formats::AircraftUpdate;

use crate::{Aircraft, Dropout, Result, TrackError, DEF_THRESHOLD};

/// Counters over a whole run.
///
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Stats {
    /// Records given to `process_aircraft()`
    pub records: usize,
    /// Stale or cached records, ignored
    pub stale: usize,
    /// Records in error
    pub rejected: usize,
    /// Aircraft registered
    pub aircraft: usize,
}

/// Representation of the world.
///
/// Owns every aircraft and the list of dropouts, in the order they were found.
///
#[derive(Debug)]
pub struct World {
    /// Dropout and staleness threshold in seconds
    threshold: f64,
    /// hex -> aircraft
    aircraft: HashMap<String, Aircraft>,
    /// All gaps found so far
    dropouts: Vec<Dropout>,
    stats: Stats,
}

impl Default for World {
    fn default() -> Self {
        World::new()
    }
}

impl World {
    /// Empty world with the default threshold
    ///
    pub fn new() -> Self {
        World::with_threshold(DEF_THRESHOLD)
    }

    /// Empty world with a specific threshold in seconds
    ///
    pub fn with_threshold(threshold: f64) -> Self {
        World {
            threshold,
            aircraft: HashMap::new(),
            dropouts: vec![],
            stats: Stats::default(),
        }
    }

    /// Ingest one record observed at `time`.
    ///
    /// Records must arrive in non-decreasing `time` order.  Stale records (reused last position
    /// or not refreshed for `threshold` seconds) are ignored.  Errors are per-record and leave the
    /// world as it was.
    ///
    pub fn process_aircraft(&mut self, update: &AircraftUpdate, time: DateTime<Utc>) -> Result<()> {
        self.stats.records += 1;

        let res = self.ingest(update, time);
        if res.is_err() {
            self.stats.rejected += 1;
        }
        res
    }

    fn ingest(&mut self, update: &AircraftUpdate, time: DateTime<Utc>) -> Result<()> {
        let hex = update.hex.as_deref().ok_or(TrackError::MissingHex)?;

        if update.has_last_position() {
            trace!("{hex} is a stale update (lastPosition)");
            self.stats.stale += 1;
            return Ok(());
        }

        let seen = update
            .seen
            .ok_or_else(|| TrackError::MissingSeen(hex.to_owned()))?;
        if seen >= self.threshold {
            trace!("{hex} is a stale update (seen {seen}s)");
            self.stats.stale += 1;
            return Ok(());
        }

        match self.aircraft.get_mut(hex) {
            Some(aircraft) => {
                if let Some(dropout) = aircraft.process_update(update, time)? {
                    self.dropouts.push(dropout);
                }
            }
            None => {
                let aircraft = Aircraft::new(hex, update, time, self.threshold)?;
                debug!("Adding aircraft {hex}: {:?}", update);
                self.aircraft.insert(hex.to_owned(), aircraft);
                self.stats.aircraft += 1;
            }
        }
        Ok(())
    }

    #[inline]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    #[inline]
    pub fn aircraft(&self) -> &HashMap<String, Aircraft> {
        &self.aircraft
    }

    #[inline]
    pub fn get(&self, hex: &str) -> Option<&Aircraft> {
        self.aircraft.get(hex)
    }

    /// All dropouts, in detection order
    ///
    #[inline]
    pub fn dropouts(&self) -> &[Dropout] {
        &self.dropouts
    }

    #[inline]
    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn into_dropouts(self) -> Vec<Dropout> {
        self.dropouts
    }
}
