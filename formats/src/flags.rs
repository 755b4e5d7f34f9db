//! Aircraft database flags.
//!
//! ADSBExchange merges its own aircraft database into the feed and flags some airframes
//! through the `dbFlags` bitfield.
//!

use bitflags::bitflags;

bitflags! {
    /// Decoded `dbFlags`, unknown bits are retained.
    ///
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DbFlags: u32 {
        /// Military aircraft
        const MILITARY = 0b0001;
        /// Flagged as "interesting" by the database maintainers
        const INTERESTING = 0b0010;
        /// Privacy ICAO Address
        const PIA = 0b0100;
        /// Limiting Aircraft Data Displayed
        const LADD = 0b1000;
    }
}

impl From<u32> for DbFlags {
    fn from(value: u32) -> Self {
        DbFlags::from_bits_retain(value)
    }
}

impl DbFlags {
    #[inline]
    pub fn military(&self) -> bool {
        self.contains(DbFlags::MILITARY)
    }

    #[inline]
    pub fn interesting(&self) -> bool {
        self.contains(DbFlags::INTERESTING)
    }

    #[inline]
    pub fn pia(&self) -> bool {
        self.contains(DbFlags::PIA)
    }

    #[inline]
    pub fn ladd(&self) -> bool {
        self.contains(DbFlags::LADD)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, false, false, false, false)]
    #[case(1, true, false, false, false)]
    #[case(2, false, true, false, false)]
    #[case(4, false, false, true, false)]
    #[case(8, false, false, false, true)]
    #[case(9, true, false, false, true)]
    #[case(0b1111, true, true, true, true)]
    fn test_dbflags(
        #[case] bits: u32,
        #[case] military: bool,
        #[case] interesting: bool,
        #[case] pia: bool,
        #[case] ladd: bool,
    ) {
        let f = DbFlags::from(bits);
        assert_eq!(military, f.military());
        assert_eq!(interesting, f.interesting());
        assert_eq!(pia, f.pia());
        assert_eq!(ladd, f.ladd());
    }

    #[test]
    fn test_dbflags_unknown_bits() {
        let f = DbFlags::from(0b1_0001);
        assert!(f.military());
        assert_eq!(0b1_0001, f.bits());
    }
}
