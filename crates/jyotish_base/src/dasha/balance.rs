//! Birth balance: how much of the first mahadasha the Moon's nakshatra
//! position has already consumed.

use serde::{Deserialize, Serialize};

use crate::error::JyotishError;
use crate::graha::Graha;
use crate::nakshatra::Nakshatra;
use crate::position::SiderealPosition;
use crate::util::ensure_finite;

use super::system::DashaSystem;
use super::types::MS_PER_YEAR;

/// Birth balance of the first mahadasha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BirthBalance {
    pub system: DashaSystem,
    pub nakshatra: Nakshatra,
    /// Lord of the birth mahadasha.
    pub lord: Graha,
    /// Fraction of the nakshatra already traversed, [0, 1).
    pub elapsed_fraction: f64,
    /// Part of the first mahadasha elapsed before birth.
    pub consumed_ms: i64,
    /// Part of the first mahadasha still to run at birth.
    pub remaining_ms: i64,
    pub remaining_years: f64,
}

impl BirthBalance {
    /// Vimshottari balance from the Moon's sidereal position.
    pub fn from_moon(moon: &SiderealPosition) -> Result<Self, JyotishError> {
        Self::for_system(DashaSystem::Vimshottari, moon)
    }

    /// Balance of `system`'s first period from the Moon's position.
    ///
    /// The consumed part is rounded to whole milliseconds and kept strictly
    /// below the full mahadasha so that birth always lies inside it.
    pub fn for_system(system: DashaSystem, moon: &SiderealPosition) -> Result<Self, JyotishError> {
        ensure_finite(moon.longitude, "moon longitude is not finite")?;
        let nakshatra = moon.nakshatra;
        let start = system.starting_index(moon.nakshatra_index);
        let lord = system.lords()[start];
        let elapsed_fraction = moon.nakshatra_fraction();

        let full_ms = system.years_at(start) as i64 * MS_PER_YEAR;
        let consumed_ms = ((elapsed_fraction * full_ms as f64).round() as i64).clamp(0, full_ms - 1);
        let remaining_ms = full_ms - consumed_ms;

        Ok(Self {
            system,
            nakshatra,
            lord,
            elapsed_fraction,
            consumed_ms,
            remaining_ms,
            remaining_years: remaining_ms as f64 / MS_PER_YEAR as f64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dasha::vimshottari::lord_years;
    use crate::nakshatra::NAKSHATRA_SPAN;

    const EPS: f64 = 1e-9;

    fn moon(lon: f64) -> SiderealPosition {
        SiderealPosition::from_longitude(lon).unwrap()
    }

    #[test]
    fn start_of_ashwini_full_ketu() {
        let b = BirthBalance::from_moon(&moon(0.0)).unwrap();
        assert_eq!(b.lord, Graha::Ketu);
        assert_eq!(b.consumed_ms, 0);
        assert!((b.remaining_years - 7.0).abs() < EPS);
    }

    #[test]
    fn bharani_at_19_degrees() {
        let b = BirthBalance::from_moon(&moon(19.0)).unwrap();
        assert_eq!(b.nakshatra, Nakshatra::Bharani);
        assert_eq!(b.lord, Graha::Shukra);
        let expected = (19.0 % NAKSHATRA_SPAN) / NAKSHATRA_SPAN;
        assert!((b.elapsed_fraction - expected).abs() < 1e-12);
        assert!((b.remaining_years - 20.0 * (1.0 - expected)).abs() < 1e-6);
    }

    #[test]
    fn consumed_plus_remaining_is_full() {
        let b = BirthBalance::from_moon(&moon(250.0)).unwrap();
        assert_eq!(
            b.consumed_ms + b.remaining_ms,
            lord_years(b.lord) as i64 * MS_PER_YEAR
        );
    }

    #[test]
    fn end_of_nakshatra_keeps_one_ms() {
        let b = BirthBalance::from_moon(&moon(NAKSHATRA_SPAN - 1e-6)).unwrap();
        assert!(b.remaining_ms >= 1);
    }

    #[test]
    fn whole_degree_midpoint_is_exact_half() {
        // 180 is halfway through Chitra
        let b = BirthBalance::from_moon(&moon(180.0)).unwrap();
        assert_eq!(b.nakshatra, Nakshatra::Chitra);
        assert_eq!(b.lord, Graha::Mangal);
        assert_eq!(b.consumed_ms, 7 * MS_PER_YEAR / 2);
        assert!((b.remaining_years - 3.5).abs() < EPS);
    }

    #[test]
    fn yogini_balance_uses_yogini_years() {
        // 180 is halfway through Chitra, whose yogini is Mangala (1 year)
        let b = BirthBalance::for_system(DashaSystem::Yogini, &moon(180.0)).unwrap();
        assert_eq!(b.system, DashaSystem::Yogini);
        assert_eq!(b.lord, Graha::Chandra);
        assert_eq!(b.consumed_ms, MS_PER_YEAR / 2);
        assert!((b.remaining_years - 0.5).abs() < EPS);
    }

    #[test]
    fn negative_longitude_wraps_to_revati() {
        let b = BirthBalance::from_moon(&moon(-1.0)).unwrap();
        assert_eq!(b.nakshatra, Nakshatra::Revati);
        assert_eq!(b.lord, Graha::Buddh);
    }
}
