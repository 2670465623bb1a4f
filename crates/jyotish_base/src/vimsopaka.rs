//! Vimsopaka Bala: a 20-point strength from a graha's compound dignity
//! across a weighted grouping of vargas.
//!
//! Four groupings are supported, each with weights summing to 20:
//! Shadvarga (6), Saptavarga (7), Dashavarga (10) and Shodasavarga (16).
//! Only the seven classical grahas are scored.

use serde::{Deserialize, Serialize};

use crate::dignity::{CompoundDignity, compound_dignity};
use crate::error::JyotishError;
use crate::graha::{Graha, SAPTA_GRAHAS};
use crate::position::{GrahaPositions, SiderealPosition};
use crate::varga::{Varga, varga_rashi};

/// Highest attainable score.
pub const VIMSOPAKA_MAX: f64 = 20.0;

/// A varga with its weight in a grouping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VargaWeight {
    pub varga: Varga,
    pub weight: f64,
}

const fn vw(varga: Varga, weight: f64) -> VargaWeight {
    VargaWeight { varga, weight }
}

pub const SHADVARGA: [VargaWeight; 6] = [
    vw(Varga::D1, 6.0),
    vw(Varga::D2, 2.0),
    vw(Varga::D3, 4.0),
    vw(Varga::D9, 5.0),
    vw(Varga::D12, 2.0),
    vw(Varga::D30, 1.0),
];

pub const SAPTAVARGA: [VargaWeight; 7] = [
    vw(Varga::D1, 5.0),
    vw(Varga::D2, 2.0),
    vw(Varga::D3, 3.0),
    vw(Varga::D7, 2.5),
    vw(Varga::D9, 4.5),
    vw(Varga::D12, 2.0),
    vw(Varga::D30, 1.0),
];

pub const DASHAVARGA: [VargaWeight; 10] = [
    vw(Varga::D1, 3.0),
    vw(Varga::D2, 1.5),
    vw(Varga::D3, 1.5),
    vw(Varga::D7, 1.5),
    vw(Varga::D9, 3.0),
    vw(Varga::D10, 1.5),
    vw(Varga::D12, 1.5),
    vw(Varga::D16, 2.0),
    vw(Varga::D30, 1.0),
    vw(Varga::D60, 3.5),
];

pub const SHODASAVARGA: [VargaWeight; 16] = [
    vw(Varga::D1, 3.5),
    vw(Varga::D2, 1.0),
    vw(Varga::D3, 1.0),
    vw(Varga::D4, 0.5),
    vw(Varga::D7, 0.5),
    vw(Varga::D9, 3.0),
    vw(Varga::D10, 0.5),
    vw(Varga::D12, 0.5),
    vw(Varga::D16, 2.0),
    vw(Varga::D20, 0.5),
    vw(Varga::D24, 0.5),
    vw(Varga::D27, 0.5),
    vw(Varga::D30, 1.0),
    vw(Varga::D40, 0.5),
    vw(Varga::D45, 0.5),
    vw(Varga::D60, 4.0),
];

/// Varga grouping used for the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VargaScheme {
    Shadvarga,
    Saptavarga,
    Dashavarga,
    #[default]
    Shodasavarga,
}

impl VargaScheme {
    pub const fn weights(self) -> &'static [VargaWeight] {
        match self {
            Self::Shadvarga => &SHADVARGA,
            Self::Saptavarga => &SAPTAVARGA,
            Self::Dashavarga => &DASHAVARGA,
            Self::Shodasavarga => &SHODASAVARGA,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Shadvarga => "Shadvarga",
            Self::Saptavarga => "Saptavarga",
            Self::Dashavarga => "Dashavarga",
            Self::Shodasavarga => "Shodasavarga",
        }
    }
}

impl std::fmt::Display for VargaScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Points a compound dignity earns in one varga, 2-20.
pub const fn vimsopaka_points(dignity: CompoundDignity) -> f64 {
    match dignity {
        CompoundDignity::Exalted => 20.0,
        CompoundDignity::Moolatrikona => 18.0,
        CompoundDignity::OwnSign => 15.0,
        CompoundDignity::AdhiMitra => 12.0,
        CompoundDignity::Mitra => 10.0,
        CompoundDignity::Sama => 7.0,
        CompoundDignity::Shatru => 5.0,
        CompoundDignity::AdhiShatru => 3.0,
        CompoundDignity::Debilitated => 2.0,
    }
}

/// Strength category from the score as a percentage of 20.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VimsopakaCategory {
    Excellent,
    Good,
    Moderate,
    Weak,
    VeryWeak,
}

impl VimsopakaCategory {
    pub fn from_percentage(percent: f64) -> Self {
        match percent {
            p if p >= 80.0 => Self::Excellent,
            p if p >= 60.0 => Self::Good,
            p if p >= 40.0 => Self::Moderate,
            p if p >= 20.0 => Self::Weak,
            _ => Self::VeryWeak,
        }
    }
}

/// Dignity of one graha in one varga of the grouping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VargaDignityEntry {
    pub varga: Varga,
    pub rashi: u8,
    pub dignity: CompoundDignity,
    pub points: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VimsopakaResult {
    pub graha: Graha,
    pub scheme: VargaScheme,
    /// Weighted average of the varga points, 0-20.
    pub score: f64,
    pub percentage: f64,
    pub category: VimsopakaCategory,
    /// One per varga, in grouping order.
    pub entries: Vec<VargaDignityEntry>,
}

impl VimsopakaResult {
    /// At least half of the maximum.
    pub fn is_strong(&self) -> bool {
        self.percentage >= 50.0
    }
}

/// Rashis of the seven grahas in `varga`. The rasi chart reuses the
/// placements' own rashi so it agrees with every other D1 consumer.
fn rashis_in(varga: Varga, placements: &[SiderealPosition; 7]) -> [u8; 7] {
    std::array::from_fn(|i| match varga {
        Varga::D1 => placements[i].rashi_index,
        _ => varga_rashi(placements[i].longitude, varga),
    })
}

/// Vimsopaka Bala of `graha` given the seven classical placements in
/// `SAPTA_GRAHAS` order. `None` for the nodes.
pub fn vimsopaka_bala(
    graha: Graha,
    placements: &[SiderealPosition; 7],
    scheme: VargaScheme,
) -> Option<VimsopakaResult> {
    let gi = graha.sapta_index()?;
    let weights = scheme.weights();
    let mut entries = Vec::with_capacity(weights.len());
    let mut weighted = 0.0;
    let mut total = 0.0;

    for w in weights {
        let rashis = rashis_in(w.varga, placements);
        // Moolatrikona degrees only exist in the rasi chart.
        let degree = (w.varga == Varga::D1).then_some(placements[gi].degree_in_rashi);
        let dignity = compound_dignity(graha, rashis[gi], degree, &rashis)?;
        let points = vimsopaka_points(dignity);
        weighted += points * w.weight;
        total += w.weight;
        entries.push(VargaDignityEntry {
            varga: w.varga,
            rashi: rashis[gi],
            dignity,
            points,
            weight: w.weight,
        });
    }

    let score = if total > 0.0 { weighted / total } else { 0.0 };
    let percentage = score / VIMSOPAKA_MAX * 100.0;
    Some(VimsopakaResult {
        graha,
        scheme,
        score,
        percentage,
        category: VimsopakaCategory::from_percentage(percentage),
        entries,
    })
}

/// Vimsopaka Bala for the seven classical grahas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VimsopakaTable {
    pub scheme: VargaScheme,
    entries: Vec<VimsopakaResult>,
}

impl VimsopakaTable {
    /// Entry for `graha`; `None` for Rahu and Ketu.
    pub fn get(&self, graha: Graha) -> Option<&VimsopakaResult> {
        graha.sapta_index().and_then(|i| self.entries.get(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &VimsopakaResult> {
        self.entries.iter()
    }

    /// Highest-scoring graha; ties keep the earlier graha.
    pub fn strongest(&self) -> Option<&VimsopakaResult> {
        self.entries
            .iter()
            .reduce(|best, r| if r.score > best.score { r } else { best })
    }
}

/// Vimsopaka Bala from a position snapshot. Needs all seven classical
/// grahas; the nodes are ignored.
#[tracing::instrument(level = "debug", skip(positions))]
pub fn compute_vimsopaka(
    positions: &GrahaPositions,
    scheme: VargaScheme,
) -> Result<VimsopakaTable, JyotishError> {
    let placements = SAPTA_GRAHAS
        .iter()
        .map(|g| positions.require(*g).map(|p| p.sidereal))
        .collect::<Result<Vec<_>, _>>()?;
    let placements: [SiderealPosition; 7] = placements
        .try_into()
        .map_err(|_| JyotishError::InvalidInput("expected seven classical placements"))?;

    let entries = SAPTA_GRAHAS
        .iter()
        .map(|g| {
            vimsopaka_bala(*g, &placements, scheme)
                .ok_or(JyotishError::InvalidInput("graha has no vimsopaka score"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(VimsopakaTable { scheme, entries })
}
