//! Divisional (varga) signs.
//!
//! Each varga splits a 30-degree sign into equal parts (D30 uses the
//! classical unequal segments) and maps each part to a target rashi.
//! The seven of [`SAPTAVARGA`] feed saptavargaja bala; all sixteen feed
//! vimsopaka bala.

use serde::{Deserialize, Serialize};

use crate::error::JyotishError;
use crate::graha::SAPTA_GRAHAS;
use crate::position::GrahaPositions;
use crate::rashi::{Rashi, SignType, Tattva};
use crate::util::{ensure_finite, normalize_360};

/// The sixteen classical vargas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Varga {
    /// Rasi chart.
    D1,
    /// Hora.
    D2,
    /// Drekkana.
    D3,
    D4,
    /// Saptamsha.
    D7,
    /// Navamsha.
    D9,
    D10,
    /// Dwadashamsha.
    D12,
    D16,
    D20,
    D24,
    D27,
    /// Trimshamsha.
    D30,
    D40,
    D45,
    D60,
}

pub const SAPTAVARGA: [Varga; 7] = [
    Varga::D1,
    Varga::D2,
    Varga::D3,
    Varga::D7,
    Varga::D9,
    Varga::D12,
    Varga::D30,
];

/// D30 segments for odd signs: (end degree, target rashi).
/// Aries 0-5, Aquarius 5-10, Sagittarius 10-18, Gemini 18-25, Libra 25-30.
const TRIMSHAMSHA_ODD: [(f64, u8); 5] = [(5.0, 0), (10.0, 10), (18.0, 8), (25.0, 2), (30.0, 6)];

/// D30 segments for even signs: Taurus 0-5, Virgo 5-12, Pisces 12-20,
/// Capricorn 20-25, Scorpio 25-30.
const TRIMSHAMSHA_EVEN: [(f64, u8); 5] = [(5.0, 1), (12.0, 5), (20.0, 11), (25.0, 9), (30.0, 7)];

impl Varga {
    /// Number of divisions per sign.
    pub const fn divisions(self) -> u8 {
        match self {
            Self::D1 => 1,
            Self::D2 => 2,
            Self::D3 => 3,
            Self::D4 => 4,
            Self::D7 => 7,
            Self::D9 => 9,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D16 => 16,
            Self::D20 => 20,
            Self::D24 => 24,
            Self::D27 => 27,
            Self::D30 => 30,
            Self::D40 => 40,
            Self::D45 => 45,
            Self::D60 => 60,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::D1 => "Rasi",
            Self::D2 => "Hora",
            Self::D3 => "Drekkana",
            Self::D4 => "Chaturthamsha",
            Self::D7 => "Saptamsha",
            Self::D9 => "Navamsha",
            Self::D10 => "Dashamsha",
            Self::D12 => "Dwadashamsha",
            Self::D16 => "Shodashamsha",
            Self::D20 => "Vimshamsha",
            Self::D24 => "Chaturvimshamsha",
            Self::D27 => "Bhamsha",
            Self::D30 => "Trimshamsha",
            Self::D40 => "Khavedamsha",
            Self::D45 => "Akshavedamsha",
            Self::D60 => "Shashtiamsha",
        }
    }
}

/// Rashi index occupied by `sidereal_lon` in the given varga.
pub fn varga_rashi(sidereal_lon: f64, varga: Varga) -> u8 {
    let lon = normalize_360(sidereal_lon);
    let r = ((lon / 30.0).floor() as u8).min(11);
    let deg = lon - r as f64 * 30.0;
    let rashi = Rashi::from_index(r);

    let div = |n: u8| ((deg * n as f64 / 30.0).floor() as u8).min(n - 1);
    let from = |start: u8| (start + div(varga.divisions())) % 12;
    // Movable, fixed and dual signs start from the given rashis.
    let by_type = |chara: u8, sthira: u8, dvi: u8| match rashi.sign_type() {
        SignType::Chara => chara,
        SignType::Sthira => sthira,
        SignType::Dvisvabhava => dvi,
    };
    let odd_even = |odd: u8, even: u8| if rashi.is_odd() { odd } else { even };

    match varga {
        Varga::D1 => r,
        // Odd signs: Leo then Cancer. Even signs: Cancer then Leo.
        Varga::D2 => match (rashi.is_odd(), div(2)) {
            (true, 0) | (false, 1) => 4,
            _ => 3,
        },
        Varga::D3 => (r + 4 * div(3)) % 12,
        Varga::D4 => (r + 3 * div(4)) % 12,
        Varga::D7 => from(odd_even(r, r + 6)),
        Varga::D9 => from(match rashi.tattva() {
            Tattva::Agni => 0,
            Tattva::Prithvi => 9,
            Tattva::Vayu => 6,
            Tattva::Jala => 3,
        }),
        Varga::D10 => from(odd_even(r, r + 8)),
        Varga::D12 | Varga::D60 => from(r),
        Varga::D16 | Varga::D45 => from(by_type(0, 4, 8)),
        Varga::D20 => from(by_type(0, 8, 4)),
        Varga::D24 => from(odd_even(4, 3)),
        Varga::D27 => from(match rashi.tattva() {
            Tattva::Agni => 0,
            Tattva::Prithvi => 3,
            Tattva::Vayu => 6,
            Tattva::Jala => 9,
        }),
        Varga::D30 => trimshamsha(rashi, deg),
        Varga::D40 => from(odd_even(0, 6)),
    }
}

fn trimshamsha(rashi: Rashi, deg: f64) -> u8 {
    let table = if rashi.is_odd() {
        &TRIMSHAMSHA_ODD
    } else {
        &TRIMSHAMSHA_EVEN
    };
    table
        .iter()
        .find(|(end, _)| deg < *end)
        .map_or(table[4].1, |(_, target)| *target)
}

/// Varga rashis for the seven grahas: `result[varga][graha]`.
pub fn saptavarga_rashis(positions: &GrahaPositions) -> Result<[[u8; 7]; 7], JyotishError> {
    let mut out = [[0u8; 7]; 7];
    for (gi, graha) in SAPTA_GRAHAS.iter().enumerate() {
        let lon = ensure_finite(positions.require(*graha)?.longitude(), "longitude is not finite")?;
        for (vi, varga) in SAPTAVARGA.iter().enumerate() {
            out[vi][gi] = varga_rashi(lon, *varga);
        }
    }
    Ok(out)
}
