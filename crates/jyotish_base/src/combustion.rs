//! Combustion (asta) detection.
//!
//! A graha is combust when its circular distance from the Sun is strictly
//! below its orb. Orbs follow BPHS; Mercury and Venus use tighter orbs
//! when retrograde.

use crate::graha::Graha;
use crate::position::GrahaPositions;
use crate::util::angular_separation;

/// Combustion orb in degrees. `None` for Sun, Rahu and Ketu.
pub const fn combustion_orb(graha: Graha, is_retrograde: bool) -> Option<f64> {
    match (graha, is_retrograde) {
        (Graha::Surya | Graha::Rahu | Graha::Ketu, _) => None,
        (Graha::Chandra, _) => Some(12.0),
        (Graha::Mangal, _) => Some(17.0),
        (Graha::Buddh, false) => Some(14.0),
        (Graha::Buddh, true) => Some(12.0),
        (Graha::Guru, _) => Some(11.0),
        (Graha::Shukra, false) => Some(10.0),
        (Graha::Shukra, true) => Some(8.0),
        (Graha::Shani, _) => Some(15.0),
    }
}

/// Combustion from raw longitudes. Exactly at the orb is not combust.
pub fn is_combust(graha: Graha, graha_lon: f64, sun_lon: f64, is_retrograde: bool) -> bool {
    match combustion_orb(graha, is_retrograde) {
        Some(orb) => angular_separation(graha_lon, sun_lon) < orb,
        None => false,
    }
}

/// Combustion of `graha` within a snapshot; `false` when either body is absent.
pub fn is_combust_in(graha: Graha, positions: &GrahaPositions) -> bool {
    match (positions.get(graha), positions.get(Graha::Surya)) {
        (Some(p), Some(sun)) => is_combust(graha, p.longitude(), sun.longitude(), p.is_retrograde()),
        _ => false,
    }
}
