//! Source of the data for a given aircraft state.
//!

use serde::{Deserialize, Serialize};
use strum::{EnumString, VariantNames};

/// Type of the underlying messages readsb used for the current state of an aircraft, best
/// source first.
///
/// This is a closed list, anything else is rejected when parsing.
///
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    EnumString,
    Eq,
    PartialEq,
    Serialize,
    strum::Display,
    VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MessageType {
    /// Mode S or ADS-B transponder with ICAO address
    AdsbIcao,
    /// ADS-B equipped non-transponder emitter with ICAO address
    AdsbIcaoNt,
    /// Rebroadcast of ADS-B messages originally sent via another data link
    AdsrIcao,
    /// Traffic information about a non-ADS-B target identified by an ICAO address
    TisbIcao,
    /// ADS-C (from satellite)
    Adsc,
    /// Multilateration
    Mlat,
    /// Miscellaneous data from various sources
    Other,
    /// Mode S only, no position
    ModeS,
    /// ADS-B with an anonymous address
    AdsbOther,
    /// Rebroadcast with an anonymous address
    AdsrOther,
    /// TIS-B with a non-ICAO address
    TisbOther,
    /// TIS-B with a track/file identifier
    TisbTrackfile,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("adsb_icao", MessageType::AdsbIcao)]
    #[case("adsb_icao_nt", MessageType::AdsbIcaoNt)]
    #[case("adsr_icao", MessageType::AdsrIcao)]
    #[case("tisb_icao", MessageType::TisbIcao)]
    #[case("adsc", MessageType::Adsc)]
    #[case("mlat", MessageType::Mlat)]
    #[case("other", MessageType::Other)]
    #[case("mode_s", MessageType::ModeS)]
    #[case("adsb_other", MessageType::AdsbOther)]
    #[case("adsr_other", MessageType::AdsrOther)]
    #[case("tisb_other", MessageType::TisbOther)]
    #[case("tisb_trackfile", MessageType::TisbTrackfile)]
    fn test_message_type_from_str(#[case] input: &str, #[case] mt: MessageType) {
        assert_eq!(mt, MessageType::from_str(input).unwrap());
        assert_eq!(input, mt.to_string());
    }

    #[rstest]
    #[case("")]
    #[case("ADSB_ICAO")]
    #[case("uat")]
    fn test_message_type_unknown(#[case] input: &str) {
        assert!(MessageType::from_str(input).is_err());
    }

    #[test]
    fn test_message_type_closed_list() {
        assert_eq!(12, MessageType::VARIANTS.len());
    }
}
