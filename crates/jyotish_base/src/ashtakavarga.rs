//! Ashtakavarga (benefic points) calculations.
//!
//! Implements Bhinna Ashtakavarga (BAV), Sarvashtakavarga (SAV), the two
//! Shodhana (reduction) passes and the kakshya transit helpers.
//!
//! For each of 7 grahas (Sun through Saturn), 8 contributors (7 grahas + Lagna)
//! assign benefic points to rashis based on their relative offset.
//!
//! Totals across the 12 rashis are constant for every chart:
//! - Sun: 48, Moon: 49, Mars: 39, Mercury: 54, Jupiter: 56, Venus: 52, Saturn: 39
//! - SAV total: 337
//!
//! Raw grids are never modified; the reduced grids live alongside them in
//! [`Shodhana`].

use serde::{Deserialize, Serialize};

use crate::error::JyotishError;
use crate::graha::{Graha, SAPTA_GRAHAS};
use crate::position::GrahaPositions;
use crate::rashi::RASHI_SPAN;
use crate::util::{ensure_finite, normalize_360};

// ---------------------------------------------------------------------------
// Rules table (bitmask encoding)
// ---------------------------------------------------------------------------

/// Bitmask of 1-based offsets: bit `i` set if offset `i` is listed.
const fn bits(offsets: &[u8]) -> u16 {
    let mut mask = 0u16;
    let mut i = 0;
    while i < offsets.len() {
        mask |= 1u16 << offsets[i];
        i += 1;
    }
    mask
}

/// `RULES[target][contributor]` = offsets (1 = same rashi .. 12 = previous)
/// at which `contributor` gives `target` a bindu. Contributor order is
/// Sun..Saturn then Lagna.
const RULES: [[u16; 8]; 7] = [
    // Surya
    [
        bits(&[1, 2, 4, 7, 8, 9, 10, 11]),
        bits(&[3, 6, 10, 11]),
        bits(&[1, 2, 4, 7, 8, 9, 10, 11]),
        bits(&[3, 5, 6, 9, 10, 11, 12]),
        bits(&[5, 6, 9, 11]),
        bits(&[6, 7, 12]),
        bits(&[1, 2, 4, 7, 8, 9, 10, 11]),
        bits(&[3, 4, 6, 10, 11, 12]),
    ],
    // Chandra
    [
        bits(&[3, 6, 7, 8, 10, 11]),
        bits(&[1, 3, 6, 7, 10, 11]),
        bits(&[2, 3, 5, 6, 9, 10, 11]),
        bits(&[1, 3, 4, 5, 7, 8, 10, 11]),
        bits(&[1, 4, 7, 8, 10, 11, 12]),
        bits(&[3, 4, 5, 7, 9, 10, 11]),
        bits(&[3, 5, 6, 11]),
        bits(&[3, 6, 10, 11]),
    ],
    // Mangal
    [
        bits(&[3, 5, 6, 10, 11]),
        bits(&[3, 6, 11]),
        bits(&[1, 2, 4, 7, 8, 10, 11]),
        bits(&[3, 5, 6, 11]),
        bits(&[6, 10, 11, 12]),
        bits(&[6, 8, 11, 12]),
        bits(&[1, 4, 7, 8, 9, 10, 11]),
        bits(&[1, 3, 6, 10, 11]),
    ],
    // Buddh
    [
        bits(&[5, 6, 9, 11, 12]),
        bits(&[2, 4, 6, 8, 10, 11]),
        bits(&[1, 2, 4, 7, 8, 9, 10, 11]),
        bits(&[1, 3, 5, 6, 9, 10, 11, 12]),
        bits(&[6, 8, 11, 12]),
        bits(&[1, 2, 3, 4, 5, 8, 9, 11]),
        bits(&[1, 2, 4, 7, 8, 9, 10, 11]),
        bits(&[1, 2, 4, 6, 8, 10, 11]),
    ],
    // Guru
    [
        bits(&[1, 2, 3, 4, 7, 8, 9, 10, 11]),
        bits(&[2, 5, 7, 9, 11]),
        bits(&[1, 2, 4, 7, 8, 10, 11]),
        bits(&[1, 2, 4, 5, 6, 9, 10, 11]),
        bits(&[1, 2, 3, 4, 7, 8, 10, 11]),
        bits(&[2, 5, 6, 9, 10, 11]),
        bits(&[3, 5, 6, 12]),
        bits(&[1, 2, 4, 5, 6, 7, 9, 10, 11]),
    ],
    // Shukra
    [
        bits(&[8, 11, 12]),
        bits(&[1, 2, 3, 4, 5, 8, 9, 11, 12]),
        bits(&[3, 4, 6, 9, 11, 12]),
        bits(&[3, 5, 6, 9, 11]),
        bits(&[5, 8, 9, 10, 11]),
        bits(&[1, 2, 3, 4, 5, 8, 9, 10, 11]),
        bits(&[3, 4, 5, 8, 9, 10, 11]),
        bits(&[1, 2, 3, 4, 5, 8, 9, 11]),
    ],
    // Shani
    [
        bits(&[1, 2, 4, 7, 8, 10, 11]),
        bits(&[3, 6, 11]),
        bits(&[3, 5, 6, 10, 11, 12]),
        bits(&[6, 8, 9, 10, 11, 12]),
        bits(&[5, 6, 11, 12]),
        bits(&[6, 11, 12]),
        bits(&[3, 5, 6, 11]),
        bits(&[1, 3, 4, 6, 10, 11]),
    ],
];

/// BAV totals per graha, Sun..Saturn.
pub const BAV_TOTALS: [u8; 7] = [48, 49, 39, 54, 56, 52, 39];

/// SAV total, the same for every chart.
pub const SAV_TOTAL: u16 = 337;

/// Bindu threshold for a favourable transit.
pub const FAVOURABLE_BINDUS: u8 = 4;

/// Span of one kakshya (3°45').
pub const KAKSHYA_SPAN: f64 = RASHI_SPAN / 8.0;

// ---------------------------------------------------------------------------
// Contributors
// ---------------------------------------------------------------------------

/// One of the eight reference points that give bindus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Contributor {
    Surya,
    Chandra,
    Mangal,
    Buddh,
    Guru,
    Shukra,
    Shani,
    Lagna,
}

/// Contributors in table order.
pub const ALL_CONTRIBUTORS: [Contributor; 8] = [
    Contributor::Surya,
    Contributor::Chandra,
    Contributor::Mangal,
    Contributor::Buddh,
    Contributor::Guru,
    Contributor::Shukra,
    Contributor::Shani,
    Contributor::Lagna,
];

/// Kakshya lords within each rashi, in order of the eight divisions.
pub const KAKSHYA_LORDS: [Contributor; 8] = [
    Contributor::Shani,
    Contributor::Guru,
    Contributor::Mangal,
    Contributor::Surya,
    Contributor::Shukra,
    Contributor::Buddh,
    Contributor::Chandra,
    Contributor::Lagna,
];

impl Contributor {
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The graha behind this contributor; `None` for Lagna.
    pub const fn graha(self) -> Option<Graha> {
        match self {
            Self::Surya => Some(Graha::Surya),
            Self::Chandra => Some(Graha::Chandra),
            Self::Mangal => Some(Graha::Mangal),
            Self::Buddh => Some(Graha::Buddh),
            Self::Guru => Some(Graha::Guru),
            Self::Shukra => Some(Graha::Shukra),
            Self::Shani => Some(Graha::Shani),
            Self::Lagna => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self.graha() {
            Some(g) => g.name(),
            None => "Lagna",
        }
    }
}

/// Kakshya lord for a sidereal longitude.
pub fn kakshya(sidereal_lon: f64) -> Contributor {
    let deg = normalize_360(sidereal_lon) % RASHI_SPAN;
    let idx = ((deg / KAKSHYA_SPAN).floor() as usize).min(7);
    KAKSHYA_LORDS[idx]
}

// ---------------------------------------------------------------------------
// Bhinna Ashtakavarga (BAV)
// ---------------------------------------------------------------------------

/// Bhinna Ashtakavarga for a single graha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BhinnaAshtakavarga {
    pub graha: Graha,
    /// Bindus per rashi (0-based), each 0-8.
    pub points: [u8; 12],
    /// Prastara: `contributors[c]` has bit `r` set when contributor `c`
    /// gave a bindu to rashi `r`.
    pub contributors: [u16; 8],
}

impl BhinnaAshtakavarga {
    pub fn total(&self) -> u8 {
        self.points.iter().sum()
    }

    /// Did `contributor` give a bindu to `rashi_index`?
    pub fn contributed(&self, contributor: Contributor, rashi_index: u8) -> bool {
        (self.contributors[contributor.index()] >> (rashi_index % 12)) & 1 == 1
    }
}

/// BAV of the graha at `sapta_index` (0 = Sun .. 6 = Saturn).
///
/// `graha_rashis` holds the 0-based rashi of each of the seven grahas.
pub fn calculate_bav(sapta_index: usize, graha_rashis: &[u8; 7], lagna_rashi: u8) -> BhinnaAshtakavarga {
    let rules = &RULES[sapta_index];
    let mut points = [0u8; 12];
    let mut contributors = [0u16; 8];

    for (c, &mask) in rules.iter().enumerate() {
        let from = (if c < 7 { graha_rashis[c] } else { lagna_rashi }) % 12;
        for rashi in 0u8..12 {
            let offset = (rashi + 12 - from) % 12 + 1;
            if (mask >> offset) & 1 == 1 {
                points[rashi as usize] += 1;
                contributors[c] |= 1u16 << rashi;
            }
        }
    }

    BhinnaAshtakavarga {
        graha: SAPTA_GRAHAS[sapta_index],
        points,
        contributors,
    }
}

/// BAV for all 7 grahas.
pub fn calculate_all_bav(graha_rashis: &[u8; 7], lagna_rashi: u8) -> [BhinnaAshtakavarga; 7] {
    std::array::from_fn(|i| calculate_bav(i, graha_rashis, lagna_rashi))
}

// ---------------------------------------------------------------------------
// Sarvashtakavarga (SAV)
// ---------------------------------------------------------------------------

/// Element-wise sum of the seven BAVs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SarvaAshtakavarga {
    /// Bindus per rashi, each 0-56.
    pub points: [u8; 12],
    pub lagna_rashi: u8,
}

impl SarvaAshtakavarga {
    pub fn total(&self) -> u16 {
        self.points.iter().map(|&p| p as u16).sum()
    }

    /// Bindus of whole-sign house `house` (1-12) counted from the lagna.
    pub fn house_bindus(&self, house: u8) -> u8 {
        let idx = (self.lagna_rashi as usize + (house as usize + 11) % 12) % 12;
        self.points[idx]
    }
}

/// Sum grids rashi by rashi.
pub fn sum_grids(grids: &[[u8; 12]; 7]) -> [u8; 12] {
    let mut total = [0u8; 12];
    for grid in grids {
        for (t, &p) in total.iter_mut().zip(grid) {
            *t += p;
        }
    }
    total
}

// ---------------------------------------------------------------------------
// Sodhana (reductions)
// ---------------------------------------------------------------------------

/// Trine groups (0-based rashi indices): fire, earth, air, water.
const TRIKONA_GROUPS: [[usize; 3]; 4] = [[0, 4, 8], [1, 5, 9], [2, 6, 10], [3, 7, 11]];

/// Same-lord rashi pairs: Mars, Venus, Mercury, Jupiter, Saturn.
const EKADHIPATYA_PAIRS: [[usize; 2]; 5] = [[0, 7], [1, 6], [2, 5], [8, 11], [9, 10]];

/// Trikona Sodhana: subtract the minimum of each trine group.
pub fn trikona_sodhana(points: &[u8; 12]) -> [u8; 12] {
    let mut result = *points;
    for group in &TRIKONA_GROUPS {
        let min_val = group.iter().map(|&i| result[i]).min().unwrap_or(0);
        for &i in group {
            result[i] -= min_val;
        }
    }
    result
}

fn reduce_pair(a: u8, b: u8, occupied_a: bool, occupied_b: bool) -> (u8, u8) {
    if a == 0 || b == 0 {
        return (a, b);
    }
    match (occupied_a, occupied_b) {
        (true, true) => (a, b),
        (false, false) if a == b => (0, 0),
        (false, false) => {
            let m = a.min(b);
            (m, m)
        }
        (true, false) if a >= b => (a, 0),
        (true, false) => (a, b - a),
        (false, true) if b >= a => (0, b),
        (false, true) => (a - b, b),
    }
}

/// Ekadhipatya Sodhana on a trikona-reduced grid.
///
/// `occupied[r]` is true when any of the seven grahas sits in rashi `r`.
pub fn ekadhipatya_sodhana(after_trikona: &[u8; 12], occupied: &[bool; 12]) -> [u8; 12] {
    let mut result = *after_trikona;
    for &[a, b] in &EKADHIPATYA_PAIRS {
        let (ra, rb) = reduce_pair(result[a], result[b], occupied[a], occupied[b]);
        result[a] = ra;
        result[b] = rb;
    }
    result
}

/// Reduced grids, same shape as the raw ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shodhana {
    /// Each BAV after Trikona Sodhana.
    pub after_trikona: [[u8; 12]; 7],
    /// Each BAV after Trikona then Ekadhipatya Sodhana.
    pub after_ekadhipatya: [[u8; 12]; 7],
    /// Sum of the fully reduced BAVs (shodhita SAV).
    pub sarva: [u8; 12],
}

// ---------------------------------------------------------------------------
// Combined result
// ---------------------------------------------------------------------------

/// Bindus relevant to a graha transiting a longitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitEffect {
    pub graha: Graha,
    pub rashi_index: u8,
    /// The graha's own BAV bindus in that rashi.
    pub bindus: u8,
    /// SAV bindus in that rashi.
    pub sarva_bindus: u8,
    pub kakshya: Contributor,
    /// True when the kakshya lord gave the graha a bindu there.
    pub kakshya_contributed: bool,
    pub favourable: bool,
}

/// Complete Ashtakavarga: raw BAVs and SAV plus reduced grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AshtakavargaResult {
    pub bhinna: [BhinnaAshtakavarga; 7],
    pub sarva: SarvaAshtakavarga,
    pub shodhana: Shodhana,
}

impl AshtakavargaResult {
    /// BAV of `graha`; `None` for Rahu and Ketu.
    pub fn bhinna_for(&self, graha: Graha) -> Option<&BhinnaAshtakavarga> {
        graha.sapta_index().map(|i| &self.bhinna[i])
    }

    /// Transit reading for `graha` at `sidereal_lon`; `None` for nodes or a
    /// non-finite longitude.
    pub fn transit_effect(&self, graha: Graha, sidereal_lon: f64) -> Option<TransitEffect> {
        let bav = self.bhinna_for(graha)?;
        let lon = normalize_360(ensure_finite(sidereal_lon, "transit longitude").ok()?);
        let rashi_index = ((lon / RASHI_SPAN).floor() as u8).min(11);
        let lord = kakshya(lon);
        let bindus = bav.points[rashi_index as usize];
        Some(TransitEffect {
            graha,
            rashi_index,
            bindus,
            sarva_bindus: self.sarva.points[rashi_index as usize],
            kakshya: lord,
            kakshya_contributed: bav.contributed(lord, rashi_index),
            favourable: bindus >= FAVOURABLE_BINDUS,
        })
    }
}

/// Ashtakavarga from rashi indices of the seven grahas and the lagna.
pub fn calculate_ashtakavarga(graha_rashis: &[u8; 7], lagna_rashi: u8) -> AshtakavargaResult {
    let lagna_rashi = lagna_rashi % 12;
    let bhinna = calculate_all_bav(graha_rashis, lagna_rashi);
    let raw: [[u8; 12]; 7] = std::array::from_fn(|i| bhinna[i].points);

    let mut occupied = [false; 12];
    for &r in graha_rashis {
        occupied[(r % 12) as usize] = true;
    }

    let after_trikona: [[u8; 12]; 7] = std::array::from_fn(|i| trikona_sodhana(&raw[i]));
    let after_ekadhipatya: [[u8; 12]; 7] =
        std::array::from_fn(|i| ekadhipatya_sodhana(&after_trikona[i], &occupied));

    AshtakavargaResult {
        bhinna,
        sarva: SarvaAshtakavarga {
            points: sum_grids(&raw),
            lagna_rashi,
        },
        shodhana: Shodhana {
            after_trikona,
            after_ekadhipatya,
            sarva: sum_grids(&after_ekadhipatya),
        },
    }
}

/// Ashtakavarga for a position snapshot.
///
/// Needs the seven classical grahas; nodes are ignored.
#[tracing::instrument(level = "debug", skip(positions))]
pub fn compute_ashtakavarga(
    positions: &GrahaPositions,
    ascendant_rashi: u8,
) -> Result<AshtakavargaResult, JyotishError> {
    let mut rashis = [0u8; 7];
    for (slot, graha) in rashis.iter_mut().zip(SAPTA_GRAHAS) {
        *slot = positions.require(graha)?.rashi_index();
    }
    Ok(calculate_ashtakavarga(&rashis, ascendant_rashi))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_table_bav_totals() {
        for (graha, &expected) in BAV_TOTALS.iter().enumerate() {
            let total: u32 = RULES[graha].iter().map(|&mask| mask.count_ones()).sum();
            assert_eq!(total as u8, expected, "rule count for graha {graha}");
        }
    }

    #[test]
    fn rules_table_sav_total() {
        let total: u32 = RULES
            .iter()
            .flat_map(|r| r.iter())
            .map(|&mask| mask.count_ones())
            .sum();
        assert_eq!(total as u16, SAV_TOTAL);
    }

    #[test]
    fn bav_totals_any_position() {
        let rashis = [3, 7, 0, 11, 5, 9, 2];
        let bavs = calculate_all_bav(&rashis, 1);
        for (i, bav) in bavs.iter().enumerate() {
            assert_eq!(bav.total(), BAV_TOTALS[i]);
            assert_eq!(bav.graha, SAPTA_GRAHAS[i]);
        }
    }

    #[test]
    fn sav_total_is_337() {
        let result = calculate_ashtakavarga(&[5, 2, 8, 10, 1, 6, 4], 9);
        assert_eq!(result.sarva.total(), SAV_TOTAL);
        assert!(result.sarva.points.iter().all(|&p| p <= 56));
    }

    #[test]
    fn prastara_matches_points() {
        let rashis = [2, 8, 5, 0, 11, 3, 7];
        for bav in calculate_all_bav(&rashis, 6) {
            for r in 0..12u8 {
                let n = ALL_CONTRIBUTORS
                    .iter()
                    .filter(|c| bav.contributed(**c, r))
                    .count();
                assert_eq!(n as u8, bav.points[r as usize]);
                assert!(bav.points[r as usize] <= 8);
            }
        }
    }

    #[test]
    fn sun_gets_own_bindu_in_own_rashi() {
        // Offset 1 from the Sun is favourable for the Sun's BAV.
        let bav = calculate_bav(0, &[4, 0, 0, 0, 0, 0, 0], 0);
        assert!(bav.contributed(Contributor::Surya, 4));
    }

    #[test]
    fn trikona_sodhana_basic() {
        let totals = [8, 5, 3, 2, 4, 2, 5, 1, 5, 7, 0, 6];
        let result = trikona_sodhana(&totals);
        // Fire [0,4,8]: min 4
        assert_eq!([result[0], result[4], result[8]], [4, 0, 1]);
        // Earth [1,5,9]: min 2
        assert_eq!([result[1], result[5], result[9]], [3, 0, 5]);
        // Air [2,6,10]: a zero leaves the group unchanged
        assert_eq!([result[2], result[6], result[10]], [3, 5, 0]);
        // Water [3,7,11]: min 1
        assert_eq!([result[3], result[7], result[11]], [1, 0, 5]);
    }

    #[test]
    fn trikona_equal_group_zeroes() {
        let result = trikona_sodhana(&[3; 12]);
        assert_eq!(result, [0; 12]);
    }

    #[test]
    fn ekadhipatya_pair_rules() {
        // zero in either sign: unchanged
        assert_eq!(reduce_pair(0, 4, false, false), (0, 4));
        // both occupied: unchanged
        assert_eq!(reduce_pair(3, 5, true, true), (3, 5));
        // neither occupied, equal
        assert_eq!(reduce_pair(4, 4, false, false), (0, 0));
        // neither occupied, unequal
        assert_eq!(reduce_pair(2, 5, false, false), (2, 2));
        // occupied larger: other zeroed
        assert_eq!(reduce_pair(5, 3, true, false), (5, 0));
        assert_eq!(reduce_pair(3, 3, false, true), (0, 3));
        // occupied smaller: other reduced
        assert_eq!(reduce_pair(2, 5, true, false), (2, 3));
        assert_eq!(reduce_pair(6, 1, false, true), (5, 1));
    }

    #[test]
    fn ekadhipatya_leaves_single_lord_signs() {
        let grid = [1, 2, 3, 4, 5, 6, 7, 8, 1, 2, 3, 4];
        let result = ekadhipatya_sodhana(&grid, &[false; 12]);
        // Karka and Simha have a single lord
        assert_eq!(result[3], 4);
        assert_eq!(result[4], 5);
        // Mesha/Vrischika: min(1, 8)
        assert_eq!(result[0], 1);
        assert_eq!(result[7], 1);
    }

    #[test]
    fn raw_grids_retained() {
        let rashis = [0, 3, 6, 9, 1, 4, 7];
        let result = calculate_ashtakavarga(&rashis, 10);
        for (i, bav) in result.bhinna.iter().enumerate() {
            assert_eq!(bav.total(), BAV_TOTALS[i]);
            for r in 0..12 {
                assert!(result.shodhana.after_trikona[i][r] <= bav.points[r]);
                assert!(result.shodhana.after_ekadhipatya[i][r] <= result.shodhana.after_trikona[i][r]);
            }
        }
        assert_eq!(result.sarva.total(), SAV_TOTAL);
        assert_eq!(result.shodhana.sarva, sum_grids(&result.shodhana.after_ekadhipatya));
    }

    #[test]
    fn house_bindus_from_lagna() {
        let result = calculate_ashtakavarga(&[0, 3, 6, 9, 1, 4, 7], 10);
        assert_eq!(result.sarva.house_bindus(1), result.sarva.points[10]);
        assert_eq!(result.sarva.house_bindus(3), result.sarva.points[0]);
        assert_eq!(result.sarva.house_bindus(12), result.sarva.points[9]);
    }

    #[test]
    fn kakshya_divisions() {
        assert_eq!(kakshya(0.0), Contributor::Shani);
        assert_eq!(kakshya(3.75), Contributor::Guru);
        assert_eq!(kakshya(12.0), Contributor::Surya);
        assert_eq!(kakshya(29.99), Contributor::Lagna);
        assert_eq!(kakshya(360.0 + 23.0), Contributor::Chandra);
    }

    #[test]
    fn transit_effect_reads_grids() {
        let result = calculate_ashtakavarga(&[0, 3, 6, 9, 1, 4, 7], 10);
        let t = result.transit_effect(Graha::Guru, 102.0).unwrap();
        assert_eq!(t.rashi_index, 3);
        assert_eq!(t.bindus, result.bhinna[4].points[3]);
        assert_eq!(t.sarva_bindus, result.sarva.points[3]);
        assert_eq!(t.kakshya, Contributor::Surya);
        assert_eq!(t.favourable, t.bindus >= 4);
        assert!(result.transit_effect(Graha::Rahu, 95.0).is_none());
        assert!(result.bhinna_for(Graha::Ketu).is_none());
    }

    #[test]
    fn missing_graha_fails() {
        let positions = GrahaPositions::new();
        assert_eq!(
            compute_ashtakavarga(&positions, 0),
            Err(JyotishError::MissingPosition(Graha::Surya))
        );
    }
}
