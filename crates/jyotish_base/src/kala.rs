//! Temporal context for Kala Bala: day/night, lunar phase, the four time
//! lords and graha declinations.
//!
//! Sunrise is not computed from an ephemeris. The Sun's diurnal arc is read
//! off the ascendant instead: `arc = normalize(ascendant - sun)` is 0 at
//! sunrise, 180 at sunset, and it is day while the arc is below 180.

use serde::{Deserialize, Serialize};

use crate::error::JyotishError;
use crate::graha::{Graha, SAPTA_GRAHAS};
use crate::location::GeoLocation;
use crate::position::GrahaPositions;
use crate::time::{Instant, MS_PER_DAY};
use crate::util::{ensure_finite, normalize_360};

/// Weekday lords, Sunday first.
pub const WEEKDAY_LORDS: [Graha; 7] = [
    Graha::Surya,
    Graha::Chandra,
    Graha::Mangal,
    Graha::Buddh,
    Graha::Guru,
    Graha::Shukra,
    Graha::Shani,
];

/// Chaldean order of hora lords, slowest first.
pub const HORA_SEQUENCE: [Graha; 7] = [
    Graha::Shani,
    Graha::Guru,
    Graha::Mangal,
    Graha::Surya,
    Graha::Shukra,
    Graha::Buddh,
    Graha::Chandra,
];

/// Days from the Kali epoch (JD 588465.5) to the Unix epoch.
pub const KALI_TO_UNIX_DAYS: i64 = 1_852_122;

/// Weekday of Kali day 0 (Friday, 0 = Sunday).
const KALI_EPOCH_WEEKDAY: i64 = 5;

/// Weekday of 1970-01-01 (Thursday, 0 = Sunday).
const UNIX_EPOCH_WEEKDAY: i64 = 4;

/// Birth data the strength engines need beyond graha positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BirthContext {
    pub instant: Instant,
    pub location: GeoLocation,
    /// Sidereal ascendant longitude in degrees.
    pub ascendant_longitude: f64,
}

impl BirthContext {
    pub fn new(instant: Instant, location: GeoLocation, ascendant_longitude: f64) -> Self {
        Self {
            instant,
            location,
            ascendant_longitude,
        }
    }

    /// Rashi index of the ascendant.
    pub fn ascendant_rashi(&self) -> u8 {
        ((normalize_360(self.ascendant_longitude) / 30.0).floor() as u8).min(11)
    }
}

/// Where the Sun stands in its daily round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiurnalPhase {
    /// `normalize(ascendant - sun)`, [0, 360).
    pub arc: f64,
    pub is_day: bool,
    /// Fraction of the current day or night elapsed, [0, 1).
    pub fraction: f64,
}

impl DiurnalPhase {
    pub fn new(ascendant_lon: f64, sun_lon: f64) -> Self {
        let arc = normalize_360(ascendant_lon - sun_lon);
        Self {
            arc,
            is_day: arc < 180.0,
            fraction: (arc % 180.0) / 180.0,
        }
    }

    /// Hora (planetary hour) index since sunrise, 0-23.
    pub fn hora_index(&self) -> u8 {
        ((self.arc / 15.0).floor() as u8).min(23)
    }

    /// Angular distance from local midnight, [0, 180].
    pub fn distance_from_midnight(&self) -> f64 {
        let d = (self.arc - 270.0).abs();
        if d > 180.0 { 360.0 - d } else { d }
    }
}

/// Lords of the year, month, weekday and hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KalaLords {
    pub abda: Graha,
    pub masa: Graha,
    pub vara: Graha,
    pub hora: Graha,
}

/// Civil day number (Unix days) of the Vedic day containing `instant`.
///
/// The day is taken in local mean time; pre-dawn night hours belong to the
/// previous day because the Vedic day starts at sunrise.
pub fn vedic_day(instant: Instant, location: &GeoLocation, is_day: bool) -> i64 {
    let local_ms = instant.unix_millis() + location.local_mean_time_offset_ms();
    let day = local_ms.div_euclid(MS_PER_DAY);
    let in_day = local_ms.rem_euclid(MS_PER_DAY);
    if !is_day && in_day < MS_PER_DAY / 2 {
        day - 1
    } else {
        day
    }
}

/// Weekday (0 = Sunday) of a Unix day number.
pub const fn weekday_of_unix_day(day: i64) -> usize {
    (day + UNIX_EPOCH_WEEKDAY).rem_euclid(7) as usize
}

/// Hora lord `hora_index` hours after sunrise on a day ruled by `vara`.
pub fn hora_lord(vara: Graha, hora_index: u8) -> Graha {
    let start = HORA_SEQUENCE.iter().position(|g| *g == vara).unwrap_or(0);
    HORA_SEQUENCE[(start + hora_index as usize) % 7]
}

/// Year and month lords: weekday lords of the first day of the current
/// 360-day year and 30-day month, counted from the Kali epoch.
pub fn abda_masa_lords(unix_day: i64) -> (Graha, Graha) {
    let ahargana = unix_day + KALI_TO_UNIX_DAYS;
    let year_start = ahargana.div_euclid(360) * 360;
    let month_start = ahargana.div_euclid(30) * 30;
    let abda = (KALI_EPOCH_WEEKDAY + year_start).rem_euclid(7) as usize;
    let masa = (KALI_EPOCH_WEEKDAY + month_start).rem_euclid(7) as usize;
    (WEEKDAY_LORDS[abda], WEEKDAY_LORDS[masa])
}

/// All four time lords.
pub fn kala_lords(instant: Instant, location: &GeoLocation, phase: &DiurnalPhase) -> KalaLords {
    let day = vedic_day(instant, location, phase.is_day);
    let vara = WEEKDAY_LORDS[weekday_of_unix_day(day)];
    let (abda, masa) = abda_masa_lords(day);
    KalaLords {
        abda,
        masa,
        vara,
        hora: hora_lord(vara, phase.hora_index()),
    }
}

/// Mean obliquity of the ecliptic (degrees), linear in Julian centuries
/// from J2000.
pub fn mean_obliquity(instant: Instant) -> f64 {
    let t = (instant.to_jd() - 2_451_545.0) / 36_525.0;
    23.439_291 - 0.013_004_2 * t
}

/// Declination (degrees) of a point at tropical ecliptic `lon`/`lat`.
pub fn declination(tropical_lon: f64, latitude: f64, obliquity: f64) -> f64 {
    let (l, b, e) = (
        tropical_lon.to_radians(),
        latitude.to_radians(),
        obliquity.to_radians(),
    );
    (b.sin() * e.cos() + b.cos() * e.sin() * l.sin())
        .clamp(-1.0, 1.0)
        .asin()
        .to_degrees()
}

/// Everything Kala Bala reads besides the war penalty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KalaContext {
    pub phase: DiurnalPhase,
    /// `normalize(moon - sun)`.
    pub moon_sun_elongation: f64,
    pub lords: KalaLords,
    /// Declinations of the seven grahas, Sun..Saturn.
    pub declinations: [f64; 7],
}

impl KalaContext {
    pub fn new(positions: &GrahaPositions, birth: &BirthContext) -> Result<Self, JyotishError> {
        let asc = ensure_finite(birth.ascendant_longitude, "ascendant is not finite")?;
        let sun = positions.require(Graha::Surya)?;
        let moon = positions.require(Graha::Chandra)?;
        let phase = DiurnalPhase::new(asc, sun.longitude());

        let obliquity = mean_obliquity(birth.instant);
        let mut declinations = [0.0; 7];
        for (slot, graha) in declinations.iter_mut().zip(SAPTA_GRAHAS) {
            let p = positions.require(graha)?;
            *slot = declination(p.tropical_longitude, p.latitude, obliquity);
        }

        Ok(Self {
            phase,
            moon_sun_elongation: normalize_360(moon.longitude() - sun.longitude()),
            lords: kala_lords(birth.instant, &birth.location, &phase),
            declinations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn greenwich() -> GeoLocation {
        GeoLocation::new(51.5, 0.0, 0.0).unwrap()
    }

    #[test]
    fn sunrise_and_sunset_arcs() {
        let rise = DiurnalPhase::new(100.0, 100.0);
        assert!(rise.is_day);
        assert!(rise.fraction.abs() < EPS);
        assert_eq!(rise.hora_index(), 0);

        let set = DiurnalPhase::new(280.0, 100.0);
        assert!(!set.is_day);
        assert!(set.fraction.abs() < EPS);
        assert_eq!(set.hora_index(), 12);
    }

    #[test]
    fn midnight_distance() {
        assert!(DiurnalPhase::new(270.0, 0.0).distance_from_midnight().abs() < EPS);
        assert!((DiurnalPhase::new(90.0, 0.0).distance_from_midnight() - 180.0).abs() < EPS);
        assert!((DiurnalPhase::new(0.0, 0.0).distance_from_midnight() - 90.0).abs() < EPS);
    }

    #[test]
    fn unix_epoch_is_thursday() {
        assert_eq!(WEEKDAY_LORDS[weekday_of_unix_day(0)], Graha::Guru);
        assert_eq!(WEEKDAY_LORDS[weekday_of_unix_day(-1)], Graha::Buddh);
        assert_eq!(WEEKDAY_LORDS[weekday_of_unix_day(3)], Graha::Surya);
    }

    #[test]
    fn kali_epoch_is_friday() {
        let (abda, masa) = abda_masa_lords(-KALI_TO_UNIX_DAYS);
        assert_eq!(abda, Graha::Shukra);
        assert_eq!(masa, Graha::Shukra);
        assert_eq!(
            WEEKDAY_LORDS[weekday_of_unix_day(-KALI_TO_UNIX_DAYS)],
            Graha::Shukra
        );
    }

    #[test]
    fn pre_dawn_belongs_to_previous_day() {
        // 1970-01-02 03:00 UTC at Greenwich, at night
        let t = Instant::from_unix_millis(MS_PER_DAY + 3 * 3_600_000);
        assert_eq!(vedic_day(t, &greenwich(), false), 0);
        assert_eq!(vedic_day(t, &greenwich(), true), 1);
        // evening stays on the same day
        let eve = Instant::from_unix_millis(MS_PER_DAY + 21 * 3_600_000);
        assert_eq!(vedic_day(eve, &greenwich(), false), 1);
    }

    #[test]
    fn hora_follows_chaldean_order() {
        assert_eq!(hora_lord(Graha::Surya, 0), Graha::Surya);
        assert_eq!(hora_lord(Graha::Surya, 1), Graha::Shukra);
        assert_eq!(hora_lord(Graha::Surya, 4), Graha::Shani);
        // 24 horas later the next weekday lord rules
        assert_eq!(hora_lord(Graha::Surya, 24 % 7), Graha::Chandra);
    }

    #[test]
    fn declination_at_solstice() {
        let eps = 23.44;
        assert!((declination(90.0, 0.0, eps) - eps).abs() < 1e-9);
        assert!((declination(270.0, 0.0, eps) + eps).abs() < 1e-9);
        assert!(declination(0.0, 0.0, eps).abs() < 1e-9);
    }

    #[test]
    fn obliquity_at_j2000() {
        let j2000 = Instant::from_jd(2_451_545.0).unwrap();
        assert!((mean_obliquity(j2000) - 23.439_291).abs() < 1e-9);
    }
}
