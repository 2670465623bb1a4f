//! Fixed classical tables: exaltation, moolatrikona, own signs, natural and
//! temporal friendship, benefic nature and gender.
//!
//! All tables follow BPHS (Brihat Parashara Hora Shastra). Nodes have no
//! entry in any of them; lookups return `None` or an empty slice.

use serde::{Deserialize, Serialize};

use crate::graha::Graha;
use crate::util::normalize_360;

// ---------------------------------------------------------------------------
// Exaltation, debilitation, moolatrikona, own signs
// ---------------------------------------------------------------------------

/// Sidereal exaltation degree for the sapta grahas.
///
/// Sun 10 Ari, Moon 3 Tau, Mars 28 Cap, Mercury 15 Vir,
/// Jupiter 5 Can, Venus 27 Pis, Saturn 20 Lib.
pub const fn exaltation_degree(graha: Graha) -> Option<f64> {
    match graha {
        Graha::Surya => Some(10.0),
        Graha::Chandra => Some(33.0),
        Graha::Mangal => Some(298.0),
        Graha::Buddh => Some(165.0),
        Graha::Guru => Some(95.0),
        Graha::Shukra => Some(357.0),
        Graha::Shani => Some(200.0),
        Graha::Rahu | Graha::Ketu => None,
    }
}

/// Debilitation degree: exaltation + 180, mod 360.
pub const fn debilitation_degree(graha: Graha) -> Option<f64> {
    match exaltation_degree(graha) {
        Some(e) if e >= 180.0 => Some(e - 180.0),
        Some(e) => Some(e + 180.0),
        None => None,
    }
}

/// Rashi index of exaltation.
pub const fn exaltation_rashi(graha: Graha) -> Option<u8> {
    match exaltation_degree(graha) {
        Some(e) => Some((e / 30.0) as u8),
        None => None,
    }
}

/// Rashi index of debilitation.
pub const fn debilitation_rashi(graha: Graha) -> Option<u8> {
    match debilitation_degree(graha) {
        Some(d) => Some((d / 30.0) as u8),
        None => None,
    }
}

/// Moolatrikona range as (rashi_index, start_deg, end_deg), half-open.
///
/// Sun 0-20 Leo, Moon 4-20 Tau, Mars 0-12 Ari, Mercury 16-20 Vir,
/// Jupiter 0-10 Sag, Venus 0-15 Lib, Saturn 0-20 Aqu.
pub const fn moolatrikona_range(graha: Graha) -> Option<(u8, f64, f64)> {
    match graha {
        Graha::Surya => Some((4, 0.0, 20.0)),
        Graha::Chandra => Some((1, 4.0, 20.0)),
        Graha::Mangal => Some((0, 0.0, 12.0)),
        Graha::Buddh => Some((5, 16.0, 20.0)),
        Graha::Guru => Some((8, 0.0, 10.0)),
        Graha::Shukra => Some((6, 0.0, 15.0)),
        Graha::Shani => Some((10, 0.0, 20.0)),
        Graha::Rahu | Graha::Ketu => None,
    }
}

/// Own-sign rashi indices.
pub const fn own_signs(graha: Graha) -> &'static [u8] {
    match graha {
        Graha::Surya => &[4],
        Graha::Chandra => &[3],
        Graha::Mangal => &[0, 7],
        Graha::Buddh => &[2, 5],
        Graha::Guru => &[8, 11],
        Graha::Shukra => &[1, 6],
        Graha::Shani => &[9, 10],
        Graha::Rahu | Graha::Ketu => &[],
    }
}

// ---------------------------------------------------------------------------
// Friendship
// ---------------------------------------------------------------------------

/// Natural (naisargika) relationship. Asymmetric: A's view of B may differ
/// from B's view of A.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NaisargikaMaitri {
    Friend,
    Neutral,
    Enemy,
}

const F: NaisargikaMaitri = NaisargikaMaitri::Friend;
const N: NaisargikaMaitri = NaisargikaMaitri::Neutral;
const E: NaisargikaMaitri = NaisargikaMaitri::Enemy;

/// Row = graha, column = other, both in SAPTA_GRAHAS order.
const NAISARGIKA: [[NaisargikaMaitri; 7]; 7] = [
    // Su Mo Ma Me Ju Ve Sa
    [N, F, F, N, F, E, E], // Sun
    [F, N, N, F, N, N, N], // Moon
    [F, F, N, E, F, N, N], // Mars
    [F, E, N, N, N, F, N], // Mercury
    [F, F, F, E, N, E, N], // Jupiter
    [E, E, N, F, N, N, F], // Venus
    [E, E, E, F, N, F, N], // Saturn
];

/// Natural relationship of `graha` toward `other`. Neutral when either is a node.
pub const fn naisargika_maitri(graha: Graha, other: Graha) -> NaisargikaMaitri {
    match (graha.sapta_index(), other.sapta_index()) {
        (Some(a), Some(b)) => NAISARGIKA[a][b],
        _ => NaisargikaMaitri::Neutral,
    }
}

/// Temporal relationship from current sign placements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TatkalikaMaitri {
    Friend,
    Enemy,
}

/// Friend when `other` sits in the 2nd, 3rd, 4th, 10th, 11th or 12th from `graha`.
pub const fn tatkalika_maitri(graha_rashi: u8, other_rashi: u8) -> TatkalikaMaitri {
    let dist = (other_rashi % 12 + 12 - graha_rashi % 12) % 12;
    match dist {
        1 | 2 | 3 | 9 | 10 | 11 => TatkalikaMaitri::Friend,
        _ => TatkalikaMaitri::Enemy,
    }
}

/// Five-fold compound relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PanchadhaMaitri {
    AdhiMitra,
    Mitra,
    Sama,
    Shatru,
    AdhiShatru,
}

pub const fn panchadha_maitri(n: NaisargikaMaitri, t: TatkalikaMaitri) -> PanchadhaMaitri {
    match (n, t) {
        (NaisargikaMaitri::Friend, TatkalikaMaitri::Friend) => PanchadhaMaitri::AdhiMitra,
        (NaisargikaMaitri::Neutral, TatkalikaMaitri::Friend) => PanchadhaMaitri::Mitra,
        (NaisargikaMaitri::Friend, TatkalikaMaitri::Enemy)
        | (NaisargikaMaitri::Enemy, TatkalikaMaitri::Friend) => PanchadhaMaitri::Sama,
        (NaisargikaMaitri::Neutral, TatkalikaMaitri::Enemy) => PanchadhaMaitri::Shatru,
        (NaisargikaMaitri::Enemy, TatkalikaMaitri::Enemy) => PanchadhaMaitri::AdhiShatru,
    }
}

// ---------------------------------------------------------------------------
// Nature and gender
// ---------------------------------------------------------------------------

/// Natural benefic/malefic classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BeneficNature {
    Benefic,
    Malefic,
}

/// Static nature; Moon and Mercury are resolved per chart by the callers
/// that need it.
pub const fn natural_benefic_malefic(graha: Graha) -> BeneficNature {
    match graha {
        Graha::Chandra | Graha::Buddh | Graha::Guru | Graha::Shukra => BeneficNature::Benefic,
        Graha::Surya | Graha::Mangal | Graha::Shani | Graha::Rahu | Graha::Ketu => {
            BeneficNature::Malefic
        }
    }
}

/// Moon is benefic when its phase angle from the Sun is at least 72 degrees.
pub fn moon_benefic_nature(moon_sun_elongation: f64) -> BeneficNature {
    let elong = normalize_360(moon_sun_elongation);
    let phase = if elong <= 180.0 { elong } else { 360.0 - elong };
    if phase >= 72.0 {
        BeneficNature::Benefic
    } else {
        BeneficNature::Malefic
    }
}

/// Graha gender classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrahaGender {
    Male,
    Female,
    Neuter,
}

/// Male: Sun, Mars, Jupiter. Female: Moon, Venus. Neuter: the rest.
pub const fn graha_gender(graha: Graha) -> GrahaGender {
    match graha {
        Graha::Surya | Graha::Mangal | Graha::Guru => GrahaGender::Male,
        Graha::Chandra | Graha::Shukra => GrahaGender::Female,
        Graha::Buddh | Graha::Shani | Graha::Rahu | Graha::Ketu => GrahaGender::Neuter,
    }
}
