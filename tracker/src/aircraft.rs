//! One physical airframe, identified by its ICAO address.
//!

use std::fmt;

use chrono::{DateTime, Utc};
use tracing::debug;

use dropouts_formats::{AircraftUpdate, DbFlags};

use crate::{Dropout, Flight, Result};

/// A unique airframe and its current flight.
///
#[derive(Clone, Debug)]
pub struct Aircraft {
    /// ICAO address
    hex: String,
    /// Latest known registration
    registration: Option<String>,
    /// Latest known model
    model: Option<String>,
    /// Database flags, from the first sighting
    flags: DbFlags,
    /// Call-sign of the current flight
    current_flight: String,
    /// The only live flight
    flight: Flight,
    /// How many flights we have seen
    flights: usize,
    /// Dropout threshold in seconds
    threshold: f64,
}

impl Aircraft {
    /// Register a new aircraft from its first update.
    ///
    /// The flight label is the call-sign or, if there is none yet, the registration or the
    /// address itself.  An empty registration counts as none.
    ///
    #[tracing::instrument(skip(update))]
    pub fn new(
        hex: &str,
        update: &AircraftUpdate,
        time: DateTime<Utc>,
        threshold: f64,
    ) -> Result<Self> {
        let registration = update.registration.clone();
        let current_flight = update
            .flight
            .clone()
            .or_else(|| registration.clone().filter(|r| !r.is_empty()))
            .unwrap_or_else(|| hex.to_owned());

        let flight = Flight::start(hex, &current_flight, threshold, update, time)?;

        Ok(Aircraft {
            hex: hex.to_owned(),
            registration,
            model: update.model.clone(),
            flags: update.flags(),
            current_flight,
            flight,
            flights: 1,
            threshold,
        })
    }

    /// Ingest one update for this aircraft.
    ///
    /// A call-sign change starts a new flight and is never reported as a dropout, whatever
    /// the time since the last position.  A failed update leaves the aircraft unchanged.
    ///
    /// Dropouts carry the registration and model as known once this update is applied.
    ///
    pub fn process_update(
        &mut self,
        update: &AircraftUpdate,
        time: DateTime<Utc>,
    ) -> Result<Option<Dropout>> {
        let res = match &update.flight {
            Some(callsign) if *callsign != self.current_flight => {
                let flight = Flight::start(&self.hex, callsign, self.threshold, update, time)?;
                debug!(
                    "Found updated flight for {}: ({}) -> ({})",
                    self, self.current_flight, callsign
                );
                self.current_flight = callsign.clone();
                self.flight = flight;
                self.flights += 1;
                None
            }
            _ => self.flight.process_update(update, time)?,
        };

        if let Some(reg) = &update.registration {
            if self.registration.as_ref() != Some(reg) {
                debug!(
                    "Found updated registration for {}: ({:?}) -> ({})",
                    self, self.registration, reg
                );
                self.registration = Some(reg.clone());
            }
        }

        if let Some(model) = &update.model {
            if self.model.as_ref() != Some(model) {
                debug!(
                    "Found updated type for {}: ({:?}) -> ({})",
                    self, self.model, model
                );
                self.model = Some(model.clone());
            }
        }

        Ok(res.map(|d| d.with_aircraft(self.registration(), self.model())))
    }

    #[inline]
    pub fn hex(&self) -> &str {
        &self.hex
    }

    #[inline]
    pub fn registration(&self) -> Option<&str> {
        self.registration.as_deref()
    }

    #[inline]
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    #[inline]
    pub fn flags(&self) -> DbFlags {
        self.flags
    }

    #[inline]
    pub fn military(&self) -> bool {
        self.flags.military()
    }

    #[inline]
    pub fn interesting(&self) -> bool {
        self.flags.interesting()
    }

    #[inline]
    pub fn pia(&self) -> bool {
        self.flags.pia()
    }

    #[inline]
    pub fn ladd(&self) -> bool {
        self.flags.ladd()
    }

    #[inline]
    pub fn current_flight(&self) -> &str {
        &self.current_flight
    }

    #[inline]
    pub fn flight(&self) -> &Flight {
        &self.flight
    }

    /// Number of flights started, including the current one
    ///
    #[inline]
    pub fn flights(&self) -> usize {
        self.flights
    }
}

impl fmt::Display for Aircraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.registration {
            Some(reg) => write!(f, "Aircraft {} ({})", self.hex, reg),
            None => write!(f, "Aircraft {}", self.hex),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone};

    use crate::{TrackError, DEF_THRESHOLD};

    use super::*;

    fn t(secs: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 3, 1, 0, 0, 0).unwrap() + TimeDelta::seconds(secs)
    }

    fn update(flight: Option<&str>, lat: f64, lon: f64) -> AircraftUpdate {
        AircraftUpdate {
            hex: Some("a4d5bb".to_string()),
            msg_type: Some("adsb_icao".to_string()),
            flight: flight.map(String::from),
            lat: Some(lat),
            lon: Some(lon),
            seen: Some(0.1),
            ..Default::default()
        }
    }

    #[test]
    fn test_aircraft_new_label() {
        let u = update(Some("AB1"), 39.7, -104.8);
        let a = Aircraft::new("a4d5bb", &u, t(0), DEF_THRESHOLD).unwrap();
        assert_eq!("AB1", a.current_flight());
        assert_eq!(1, a.flights());
        assert_eq!(1, a.flight().positions());

        let mut u = update(None, 39.7, -104.8);
        u.registration = Some("N413EM".to_string());
        let a = Aircraft::new("a4d5bb", &u, t(0), DEF_THRESHOLD).unwrap();
        assert_eq!("N413EM", a.current_flight());

        let u = update(None, 39.7, -104.8);
        let a = Aircraft::new("a4d5bb", &u, t(0), DEF_THRESHOLD).unwrap();
        assert_eq!("a4d5bb", a.current_flight());
        assert_eq!("Aircraft a4d5bb", a.to_string());

        // Empty registration falls back to the address
        let mut u = update(None, 39.7, -104.8);
        u.registration = Some(String::new());
        let a = Aircraft::new("a4d5bb", &u, t(0), DEF_THRESHOLD).unwrap();
        assert_eq!("a4d5bb", a.current_flight());
    }

    #[test]
    fn test_aircraft_first_callsign_starts_flight() {
        let mut u = update(None, 39.7, -104.8);
        u.registration = Some("N413EM".to_string());
        u.db_flags = 0b0001;
        let mut a = Aircraft::new("a4d5bb", &u, t(0), DEF_THRESHOLD).unwrap();
        assert_eq!("N413EM", a.current_flight());

        // First call-sign after a long gap is a new flight, not a dropout
        let mut u = update(Some("RYR4AB"), 39.9, -104.6);
        u.db_flags = 0b0110;
        let d = a.process_update(&u, t(90)).unwrap();

        assert!(d.is_none());
        assert_eq!(2, a.flights());
        assert_eq!("RYR4AB", a.current_flight());
        assert_eq!(0, a.flight().dropouts());

        // Flags stay those of the first sighting
        assert!(a.military());
        assert!(!a.interesting());
        assert!(!a.pia());
    }

    #[test]
    fn test_aircraft_dropout_registration_at_the_time() {
        let mut u = update(Some("AB1"), 39.7, -104.8);
        u.registration = Some("EI-AAA".to_string());
        u.model = Some("A320".to_string());
        let mut a = Aircraft::new("a4d5bb", &u, t(0), DEF_THRESHOLD).unwrap();

        let mut u = update(Some("AB1"), 39.8, -104.7);
        u.registration = Some("EI-AAA".to_string());
        let d = a.process_update(&u, t(90)).unwrap().unwrap();

        let mut u = update(Some("AB1"), 39.9, -104.6);
        u.registration = Some("EI-ZZZ".to_string());
        u.model = Some("A321".to_string());
        assert!(a.process_update(&u, t(100)).unwrap().is_none());

        assert_eq!(Some("EI-AAA"), d.registration());
        assert_eq!(Some("A320"), d.model());
        assert_eq!(Some("EI-ZZZ"), a.registration());
    }

    #[test]
    fn test_aircraft_flags() {
        let mut u = update(Some("AB1"), 39.7, -104.8);
        u.db_flags = 0b1001;
        let a = Aircraft::new("a4d5bb", &u, t(0), DEF_THRESHOLD).unwrap();

        assert!(a.military());
        assert!(!a.interesting());
        assert!(!a.pia());
        assert!(a.ladd());
    }

    #[test]
    fn test_aircraft_callsign_change_no_dropout() {
        let mut a = Aircraft::new("a4d5bb", &update(Some("AB1"), 39.7, -104.8), t(0), DEF_THRESHOLD)
            .unwrap();

        let d = a.process_update(&update(Some("AB2"), 39.9, -104.6), t(120)).unwrap();
        assert!(d.is_none());
        assert_eq!("AB2", a.current_flight());
        assert_eq!(2, a.flights());
        assert_eq!("AB2", a.flight().callsign());
        assert_eq!(1, a.flight().positions());
        assert_eq!(Some(t(120)), a.flight().last_position().map(|p| p.time()));
    }

    #[test]
    fn test_aircraft_missing_callsign_keeps_flight() {
        let mut a = Aircraft::new("a4d5bb", &update(Some("AB1"), 39.7, -104.8), t(0), DEF_THRESHOLD)
            .unwrap();

        let d = a.process_update(&update(None, 39.9, -104.6), t(90)).unwrap();
        assert!(d.is_some());
        assert_eq!("AB1", a.current_flight());
        assert_eq!(1, a.flights());
    }

    #[test]
    fn test_aircraft_registration_and_model() {
        let mut u = update(Some("AB1"), 39.7, -104.8);
        u.registration = Some("N413EM".to_string());
        u.model = Some("C172".to_string());
        let mut a = Aircraft::new("a4d5bb", &u, t(0), DEF_THRESHOLD).unwrap();

        // Missing fields keep the previous values
        a.process_update(&update(Some("AB1"), 39.7, -104.8), t(5)).unwrap();
        assert_eq!(Some("N413EM"), a.registration());
        assert_eq!(Some("C172"), a.model());

        // Different values replace them
        let mut u = update(Some("AB1"), 39.7, -104.8);
        u.registration = Some("N414EM".to_string());
        u.model = Some("C182".to_string());
        a.process_update(&u, t(10)).unwrap();
        assert_eq!(Some("N414EM"), a.registration());
        assert_eq!(Some("C182"), a.model());
        assert_eq!("Aircraft a4d5bb (N414EM)", a.to_string());
    }

    #[test]
    fn test_aircraft_bad_update_unchanged() {
        let mut a = Aircraft::new("a4d5bb", &update(Some("AB1"), 39.7, -104.8), t(0), DEF_THRESHOLD)
            .unwrap();

        let mut u = update(Some("AB2"), 39.9, -104.6);
        u.msg_type = Some("bogus".to_string());
        u.registration = Some("N414EM".to_string());

        let r = a.process_update(&u, t(30));
        assert_eq!(Err(TrackError::UnknownMessageType("bogus".to_string())), r);
        assert_eq!("AB1", a.current_flight());
        assert_eq!(1, a.flights());
        assert_eq!(None, a.registration());
    }

    #[test]
    fn test_aircraft_new_bad_type() {
        let mut u = update(Some("AB1"), 39.7, -104.8);
        u.msg_type = None;

        let a = Aircraft::new("a4d5bb", &u, t(0), DEF_THRESHOLD);
        assert!(matches!(a, Err(TrackError::MissingMessageType)));
    }
}
