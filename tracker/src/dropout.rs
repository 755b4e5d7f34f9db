//! A detected coverage gap.
//!

use std::fmt;

use chrono::TimeDelta;

use crate::{great_circle, Position};

/// Gap between the last position before losing coverage (LOS) and the first one after
/// getting it back (AOS).
///
#[derive(Clone, Debug, PartialEq)]
pub struct Dropout {
    /// ICAO address of the aircraft
    hex: String,
    /// Call-sign (or its stand-in) of the flight at the time
    flight: String,
    /// Registration of the aircraft at the time
    registration: Option<String>,
    /// Model of the aircraft at the time
    model: Option<String>,
    /// Loss of signal
    start: Position,
    /// Acquisition of signal
    end: Position,
}

impl Dropout {
    pub fn new(hex: &str, flight: &str, start: Position, end: Position) -> Self {
        Dropout {
            hex: hex.to_owned(),
            flight: flight.to_owned(),
            registration: None,
            model: None,
            start,
            end,
        }
    }

    /// Attach what we know of the airframe when the gap was found.
    ///
    pub fn with_aircraft(self, registration: Option<&str>, model: Option<&str>) -> Self {
        Dropout {
            registration: registration.map(String::from),
            model: model.map(String::from),
            ..self
        }
    }

    #[inline]
    pub fn hex(&self) -> &str {
        &self.hex
    }

    #[inline]
    pub fn flight(&self) -> &str {
        &self.flight
    }

    #[inline]
    pub fn registration(&self) -> Option<&str> {
        self.registration.as_deref()
    }

    #[inline]
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Last position before the gap
    ///
    #[inline]
    pub fn start(&self) -> &Position {
        &self.start
    }

    /// First position after the gap
    ///
    #[inline]
    pub fn end(&self) -> &Position {
        &self.end
    }

    /// Duration of the gap
    ///
    pub fn duration(&self) -> TimeDelta {
        self.end.time() - self.start.time()
    }

    /// Duration of the gap in seconds
    ///
    pub fn gap_secs(&self) -> f64 {
        secs(self.duration())
    }

    /// Distance in meters between LOS and AOS
    ///
    pub fn great_circle(&self) -> f64 {
        great_circle(&self.start, &self.end)
    }
}

impl fmt::Display for Dropout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LOS/AOS hex: {} ({}):\n\tLOS: {}\n\tAOS: {}\n\tGap: {}s\n\tGreat Circle: {:.0}m",
            self.hex,
            self.flight.trim(),
            self.start,
            self.end,
            self.gap_secs(),
            self.great_circle()
        )
    }
}

/// Fractional seconds in a `TimeDelta`.
///
#[inline]
pub(crate) fn secs(d: TimeDelta) -> f64 {
    d.num_milliseconds() as f64 / 1_000.
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn test_dropout() {
        let t0 = Utc.with_ymd_and_hms(2022, 3, 1, 0, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2022, 3, 1, 0, 1, 30).unwrap();

        let los = Position::new(t0, 50.8, 4.4, None, Some("adsb_icao")).unwrap();
        let aos = Position::new(t1, 54.7, -6.2, None, Some("mlat")).unwrap();
        let d = Dropout::new("4ca7b5", "RYR4AB  ", los.clone(), aos.clone());

        assert_eq!("4ca7b5", d.hex());
        assert_eq!("RYR4AB  ", d.flight());
        assert_eq!(&los, d.start());
        assert_eq!(&aos, d.end());
        assert_eq!(None, d.registration());
        assert_eq!(TimeDelta::seconds(90), d.duration());
        assert_eq!(90., d.gap_secs());
        assert_eq!("833621", format!("{:.0}", d.great_circle()));

        let s = d.to_string();
        assert!(s.starts_with("LOS/AOS hex: 4ca7b5 (RYR4AB)"));
        assert!(s.contains("Great Circle: 833621m"));

        let d = d.with_aircraft(Some("EI-DCL"), Some("B738"));
        assert_eq!(Some("EI-DCL"), d.registration());
        assert_eq!(Some("B738"), d.model());
        assert_eq!(90., d.gap_secs());
    }

    #[test]
    fn test_secs() {
        assert_eq!(1.5, secs(TimeDelta::milliseconds(1_500)));
        assert_eq!(0., secs(TimeDelta::zero()));
    }
}
