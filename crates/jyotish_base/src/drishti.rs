//! Graha drishti (aspect) strength in virupa.
//!
//! Base strength follows the classical piecewise curve over the forward
//! angular distance from the aspecting graha to the target. Mars, Jupiter
//! and Saturn add a bonus on their special aspects.

use serde::{Deserialize, Serialize};

use crate::graha::{ALL_GRAHAS, Graha};
use crate::position::GrahaPositions;
use crate::util::normalize_360;

/// Aspect of one graha on one point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrishtiEntry {
    /// Forward distance from source to target, [0, 360).
    pub angular_distance: f64,
    pub base_virupa: f64,
    /// Mars/Jupiter/Saturn bonus.
    pub special_virupa: f64,
    pub total_virupa: f64,
}

/// Piecewise base virupa.
///
/// | distance | virupa |
/// |---|---|
/// | 0-30 | 0 |
/// | 30-90 | (A-30)·0.75, rising to 45 |
/// | 90-150 | 45-(A-90)·0.75, falling to 0 |
/// | 150-180 | (A-150)·2, rising to 60 |
/// | 180-300 | 60-(A-180)·0.5, falling to 0 |
/// | 300-360 | 0 |
pub fn base_virupa(angular_distance: f64) -> f64 {
    let a = normalize_360(angular_distance);
    match a {
        a if a < 30.0 => 0.0,
        a if a < 90.0 => (a - 30.0) * 0.75,
        a if a < 150.0 => 45.0 - (a - 90.0) * 0.75,
        a if a < 180.0 => (a - 150.0) * 2.0,
        a if a < 300.0 => 60.0 - (a - 180.0) * 0.5,
        _ => 0.0,
    }
}

/// Special-aspect bonus: Mars 4th/8th (+15), Jupiter 5th/9th (+30),
/// Saturn 3rd/10th (+45).
pub fn special_virupa(graha: Graha, angular_distance: f64) -> f64 {
    let a = normalize_360(angular_distance);
    let (bonus, first, second) = match graha {
        Graha::Mangal => (15.0, 90.0..120.0, 210.0..240.0),
        Graha::Guru => (30.0, 120.0..150.0, 240.0..270.0),
        Graha::Shani => (45.0, 60.0..90.0, 270.0..300.0),
        _ => return 0.0,
    };
    if first.contains(&a) || second.contains(&a) {
        bonus
    } else {
        0.0
    }
}

/// Aspect of `graha` at `source_lon` on `target_lon`.
pub fn graha_drishti(graha: Graha, source_lon: f64, target_lon: f64) -> DrishtiEntry {
    let angular_distance = normalize_360(target_lon - source_lon);
    let base = base_virupa(angular_distance);
    let special = special_virupa(graha, angular_distance);
    DrishtiEntry {
        angular_distance,
        base_virupa: base,
        special_virupa: special,
        total_virupa: base + special,
    }
}

/// Graha-to-graha aspects: `entries[source][target]` by `Graha::index()`.
/// The diagonal and pairs with a missing body are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrishtiMatrix {
    pub entries: [[Option<DrishtiEntry>; 9]; 9],
}

impl DrishtiMatrix {
    pub fn get(&self, source: Graha, target: Graha) -> Option<&DrishtiEntry> {
        self.entries[source.index() as usize][target.index() as usize].as_ref()
    }

    /// Aspects cast on `target` by every other present graha.
    pub fn received(&self, target: Graha) -> impl Iterator<Item = (Graha, &DrishtiEntry)> + '_ {
        ALL_GRAHAS
            .into_iter()
            .filter_map(move |src| self.get(src, target).map(|e| (src, e)))
    }
}

/// Aspects between every pair of present grahas.
pub fn drishti_matrix(positions: &GrahaPositions) -> DrishtiMatrix {
    let mut entries = [[None; 9]; 9];
    for src in ALL_GRAHAS {
        let Some(s) = positions.get(src) else {
            continue;
        };
        for tgt in ALL_GRAHAS {
            if src == tgt {
                continue;
            }
            if let Some(t) = positions.get(tgt) {
                entries[src.index() as usize][tgt.index() as usize] =
                    Some(graha_drishti(src, s.longitude(), t.longitude()));
            }
        }
    }
    DrishtiMatrix { entries }
}
