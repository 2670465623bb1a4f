//! Shadbala (six-fold planetary strength) computation.
//!
//! **Sapta grahas only** (Sun through Saturn). Single-graha functions return
//! `None` for Rahu/Ketu and [`ShadbalaTable::get`] has no entry for them.
//!
//! The six components, all in virupa (1 rupa = 60 virupa):
//! 1. Sthana Bala (positional): uchcha + saptavargaja + ojhayugma + kendradi + drekkana
//! 2. Dig Bala (directional)
//! 3. Kala Bala (temporal): nathonnatha + paksha + tribhaga + abda + masa + vara + hora + ayana + yuddha
//! 4. Chesta Bala (motional)
//! 5. Naisargika Bala (natural)
//! 6. Drik Bala (aspectual)

use serde::{Deserialize, Serialize};

use crate::combustion::is_combust_in;
use crate::dignity::{CompoundDignity, compound_dignity};
use crate::drishti::{DrishtiMatrix, drishti_matrix};
use crate::error::JyotishError;
use crate::graha::{ALL_GRAHAS, Graha, SAPTA_GRAHAS};
use crate::house::{assign_house, house_distance};
use crate::kala::{BirthContext, DiurnalPhase, KalaContext, KalaLords};
use crate::position::{GrahaPosition, GrahaPositions};
use crate::rashi::Rashi;
use crate::relationships::{
    BeneficNature, GrahaGender, exaltation_degree, graha_gender, moon_benefic_nature,
    natural_benefic_malefic,
};
use crate::util::angular_separation;
use crate::varga::{SAPTAVARGA, Varga, saptavarga_rashis};
use crate::yuddha::{WarRole, war_state};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Natural strength in virupa, Sun..Saturn.
pub const NAISARGIKA_BALA: [f64; 7] = [60.0, 51.43, 17.14, 25.71, 34.29, 42.86, 8.57];

/// House of maximum directional strength, Sun..Saturn.
pub const DIG_BALA_HOUSE: [u8; 7] = [4, 10, 10, 7, 1, 1, 4];

/// Daily speed (deg/day) that earns full Chesta Bala, Sun..Saturn.
pub const MAX_SPEED: [f64; 7] = [1.0, 15.0, 0.8, 2.2, 0.25, 1.6, 0.13];

/// Minimum total in rupa for a graha to count as strong, Sun..Saturn.
pub const REQUIRED_RUPA: [f64; 7] = [6.5, 6.0, 5.0, 7.0, 6.5, 5.5, 5.0];

/// Below this absolute speed (deg/day) a graha is stationary.
pub const STATIONARY_SPEED: f64 = 1e-4;

/// Virupa per rupa.
pub const VIRUPA_PER_RUPA: f64 = 60.0;

/// Points per varga for each compound dignity.
const fn saptavargaja_points(dignity: CompoundDignity) -> f64 {
    match dignity {
        CompoundDignity::Exalted => 30.0,
        CompoundDignity::Moolatrikona => 22.5,
        CompoundDignity::OwnSign => 20.0,
        CompoundDignity::AdhiMitra => 15.0,
        CompoundDignity::Mitra => 10.0,
        CompoundDignity::Sama => 7.5,
        CompoundDignity::Shatru => 5.0,
        CompoundDignity::AdhiShatru => 2.5,
        CompoundDignity::Debilitated => 1.25,
    }
}

/// Benefic/malefic nature for strength purposes: Moon and Mercury follow
/// the lunar phase.
fn phase_nature(graha: Graha, moon_sun_elong: f64) -> BeneficNature {
    match graha {
        Graha::Chandra | Graha::Buddh => moon_benefic_nature(moon_sun_elong),
        _ => natural_benefic_malefic(graha),
    }
}

// ---------------------------------------------------------------------------
// Sthana Bala
// ---------------------------------------------------------------------------

/// Uchcha Bala: `60 * (1 - distance_from_exaltation / 180)`.
pub fn uchcha_bala(graha: Graha, sidereal_lon: f64) -> Option<f64> {
    graha.sapta_index()?;
    let exalt = exaltation_degree(graha)?;
    Some(60.0 * (1.0 - angular_separation(sidereal_lon, exalt) / 180.0))
}

/// Saptavargaja Bala: dignity points summed over the seven vargas.
///
/// `varga_rashis[varga][graha]` as returned by [`saptavarga_rashis`]; the
/// moolatrikona degree range only applies in D1.
pub fn saptavargaja_bala(
    graha: Graha,
    degree_in_rashi: f64,
    varga_rashis: &[[u8; 7]; 7],
) -> Option<f64> {
    let gi = graha.sapta_index()?;
    let mut total = 0.0;
    for (vi, varga) in SAPTAVARGA.iter().enumerate() {
        let deg = (*varga == Varga::D1).then_some(degree_in_rashi);
        let dignity = compound_dignity(graha, varga_rashis[vi][gi], deg, &varga_rashis[vi])?;
        total += saptavargaja_points(dignity);
    }
    Some(total)
}

/// Ojhayugma Bala: 15 each for rashi and navamsha parity. Moon and Venus
/// want even signs, the rest odd.
pub fn ojhayugma_bala(graha: Graha, rashi_index: u8, navamsha_rashi: u8) -> Option<f64> {
    graha.sapta_index()?;
    let wants_odd = graha_gender(graha) != GrahaGender::Female;
    let score = [rashi_index, navamsha_rashi]
        .iter()
        .filter(|r| Rashi::from_index(**r).is_odd() == wants_odd)
        .count();
    Some(15.0 * score as f64)
}

/// Kendradi Bala: kendra 60, panaphara 30, apoklima 15.
pub fn kendradi_bala(house: u8) -> f64 {
    match (house + 11) % 12 % 3 {
        0 => 60.0,
        1 => 30.0,
        _ => 15.0,
    }
}

/// Drekkana Bala: male in the 1st decanate, female in the 2nd, neuter in
/// the 3rd score 15.
pub fn drekkana_bala(graha: Graha, degree_in_rashi: f64) -> Option<f64> {
    graha.sapta_index()?;
    let decanate = ((degree_in_rashi / 10.0).floor() as i64).clamp(0, 2);
    let hit = matches!(
        (graha_gender(graha), decanate),
        (GrahaGender::Male, 0) | (GrahaGender::Female, 1) | (GrahaGender::Neuter, 2)
    );
    Some(if hit { 15.0 } else { 0.0 })
}

/// Sthana Bala breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SthanaBala {
    pub uchcha: f64,
    pub saptavargaja: f64,
    pub ojhayugma: f64,
    pub kendradi: f64,
    pub drekkana: f64,
    pub total: f64,
}

pub fn sthana_bala(
    position: &GrahaPosition,
    house: u8,
    varga_rashis: &[[u8; 7]; 7],
) -> Option<SthanaBala> {
    let graha = position.graha;
    let gi = graha.sapta_index()?;
    let sid = &position.sidereal;
    let navamsha = varga_rashis[SAPTAVARGA.iter().position(|v| *v == Varga::D9)?][gi];

    let uchcha = uchcha_bala(graha, sid.longitude)?;
    let saptavargaja = saptavargaja_bala(graha, sid.degree_in_rashi, varga_rashis)?;
    let ojhayugma = ojhayugma_bala(graha, sid.rashi_index, navamsha)?;
    let kendradi = kendradi_bala(house);
    let drekkana = drekkana_bala(graha, sid.degree_in_rashi)?;
    Some(SthanaBala {
        uchcha,
        saptavargaja,
        ojhayugma,
        kendradi,
        drekkana,
        total: uchcha + saptavargaja + ojhayugma + kendradi + drekkana,
    })
}

// ---------------------------------------------------------------------------
// Dig Bala
// ---------------------------------------------------------------------------

/// Dig Bala: `60 * (1 - d/6)` with `d` the house distance from the
/// graha's strongest house.
pub fn dig_bala(graha: Graha, house: u8) -> Option<f64> {
    let gi = graha.sapta_index()?;
    let d = house_distance(house, DIG_BALA_HOUSE[gi]);
    Some(60.0 * (1.0 - d as f64 / 6.0))
}

// ---------------------------------------------------------------------------
// Kala Bala
// ---------------------------------------------------------------------------

/// Nathonnatha Bala: Sun, Jupiter and Venus gain towards noon, Moon, Mars
/// and Saturn towards midnight. Mercury always scores 60.
pub fn nathonnatha_bala(graha: Graha, phase: &DiurnalPhase) -> Option<f64> {
    let from_midnight = phase.distance_from_midnight() / 3.0;
    match graha {
        Graha::Buddh => Some(60.0),
        Graha::Surya | Graha::Guru | Graha::Shukra => Some(from_midnight),
        Graha::Chandra | Graha::Mangal | Graha::Shani => Some(60.0 - from_midnight),
        Graha::Rahu | Graha::Ketu => None,
    }
}

/// Paksha Bala: benefics score `phase/3`, malefics `60 - phase/3`, where
/// `phase` is the Moon-Sun elongation folded into [0, 180]. The Moon
/// always counts as benefic here.
pub fn paksha_bala(graha: Graha, moon_sun_elong: f64) -> Option<f64> {
    graha.sapta_index()?;
    let phase = angular_separation(moon_sun_elong, 0.0);
    let nature = if graha == Graha::Chandra {
        BeneficNature::Benefic
    } else {
        phase_nature(graha, moon_sun_elong)
    };
    Some(match nature {
        BeneficNature::Benefic => phase / 3.0,
        BeneficNature::Malefic => 60.0 - phase / 3.0,
    })
}

/// Tribhaga Bala: lords of the current third of day or night score 60;
/// Jupiter always scores 60.
pub fn tribhaga_bala(graha: Graha, phase: &DiurnalPhase) -> Option<f64> {
    graha.sapta_index()?;
    if graha == Graha::Guru {
        return Some(60.0);
    }
    let third = ((phase.fraction * 3.0).floor() as usize).min(2);
    let lords = if phase.is_day {
        [Graha::Buddh, Graha::Surya, Graha::Shani]
    } else {
        [Graha::Chandra, Graha::Shukra, Graha::Mangal]
    };
    Some(if lords[third] == graha { 60.0 } else { 0.0 })
}

/// Abda, masa, vara and hora scores: 15, 30, 45, 60 for the matching lord.
pub fn lord_balas(graha: Graha, lords: &KalaLords) -> [f64; 4] {
    let score = |lord: Graha, value: f64| if lord == graha { value } else { 0.0 };
    [
        score(lords.abda, 15.0),
        score(lords.masa, 30.0),
        score(lords.vara, 45.0),
        score(lords.hora, 60.0),
    ]
}

/// Ayana Bala from declination clamped to ±24°: benefics
/// `(24 + δ)/48 * 60`, malefics `(24 - δ)/48 * 60`.
pub fn ayana_bala(graha: Graha, declination_deg: f64, moon_sun_elong: f64) -> Option<f64> {
    graha.sapta_index()?;
    let kranti = declination_deg.clamp(-24.0, 24.0);
    Some(match phase_nature(graha, moon_sun_elong) {
        BeneficNature::Benefic => (24.0 + kranti) / 48.0 * 60.0,
        BeneficNature::Malefic => (24.0 - kranti) / 48.0 * 60.0,
    })
}

/// Kala Bala breakdown. `yuddha` is zero or negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KalaBala {
    pub nathonnatha: f64,
    pub paksha: f64,
    pub tribhaga: f64,
    pub abda: f64,
    pub masa: f64,
    pub vara: f64,
    pub hora: f64,
    pub ayana: f64,
    pub yuddha: f64,
    pub total: f64,
}

/// Kala Bala without the war penalty.
pub fn kala_bala(graha: Graha, ctx: &KalaContext) -> Option<KalaBala> {
    let gi = graha.sapta_index()?;
    let nathonnatha = nathonnatha_bala(graha, &ctx.phase)?;
    let paksha = paksha_bala(graha, ctx.moon_sun_elongation)?;
    let tribhaga = tribhaga_bala(graha, &ctx.phase)?;
    let [abda, masa, vara, hora] = lord_balas(graha, &ctx.lords);
    let ayana = ayana_bala(graha, ctx.declinations[gi], ctx.moon_sun_elongation)?;
    Some(KalaBala {
        nathonnatha,
        paksha,
        tribhaga,
        abda,
        masa,
        vara,
        hora,
        ayana,
        yuddha: 0.0,
        total: nathonnatha + paksha + tribhaga + abda + masa + vara + hora + ayana,
    })
}

// ---------------------------------------------------------------------------
// Chesta Bala
// ---------------------------------------------------------------------------

/// Discrete motion state used for the luminaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotionState {
    Direct,
    Retrograde,
    Stationary,
    Combust,
}

impl MotionState {
    pub fn classify(daily_speed: f64, is_combust: bool) -> Self {
        if daily_speed.abs() < STATIONARY_SPEED {
            Self::Stationary
        } else if is_combust {
            Self::Combust
        } else if daily_speed < 0.0 {
            Self::Retrograde
        } else {
            Self::Direct
        }
    }

    /// Fixed Chesta Bala of a luminary in this state.
    pub const fn luminary_virupa(self) -> f64 {
        match self {
            Self::Direct => 30.0,
            Self::Retrograde => 60.0,
            Self::Stationary | Self::Combust => 15.0,
        }
    }
}

/// Chesta Bala: fixed per motion state for the luminaries; for the rest 60
/// when retrograde, else the speed ratio to [`MAX_SPEED`] scaled to 60.
pub fn chesta_bala(graha: Graha, daily_speed: f64, is_combust: bool) -> Option<f64> {
    let gi = graha.sapta_index()?;
    if graha.is_luminary() {
        return Some(MotionState::classify(daily_speed, is_combust).luminary_virupa());
    }
    if daily_speed < 0.0 {
        Some(60.0)
    } else {
        Some((daily_speed.abs() / MAX_SPEED[gi] * 60.0).min(60.0))
    }
}

// ---------------------------------------------------------------------------
// Naisargika and Drik Bala
// ---------------------------------------------------------------------------

pub fn naisargika_bala(graha: Graha) -> Option<f64> {
    graha.sapta_index().map(|gi| NAISARGIKA_BALA[gi])
}

/// Drik Bala: `(benefic virupa - malefic virupa) / 4` over the aspects the
/// other eight grahas cast on `graha`.
pub fn drik_bala(graha: Graha, aspects: &DrishtiMatrix, moon_sun_elong: f64) -> Option<f64> {
    graha.sapta_index()?;
    let mut benefic = 0.0;
    let mut malefic = 0.0;
    for (src, entry) in aspects.received(graha) {
        match phase_nature(src, moon_sun_elong) {
            BeneficNature::Benefic => benefic += entry.total_virupa,
            BeneficNature::Malefic => malefic += entry.total_virupa,
        }
    }
    Some((benefic - malefic) / 4.0)
}

// ---------------------------------------------------------------------------
// Complete Shadbala
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrengthStatus {
    Strong,
    Weak,
}

/// Shadbala of one graha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadbalaResult {
    pub graha: Graha,
    pub sthana: SthanaBala,
    pub dig: f64,
    pub kala: KalaBala,
    pub chesta: f64,
    pub naisargika: f64,
    pub drik: f64,
    pub total_virupa: f64,
    pub total_rupa: f64,
    pub required_rupa: f64,
    /// `total_rupa / required_rupa`.
    pub ratio: f64,
    pub status: StrengthStatus,
}

impl ShadbalaResult {
    fn new(
        graha: Graha,
        sthana: SthanaBala,
        dig: f64,
        kala: KalaBala,
        chesta: f64,
        naisargika: f64,
        drik: f64,
    ) -> Option<Self> {
        let gi = graha.sapta_index()?;
        let mut result = Self {
            graha,
            sthana,
            dig,
            kala,
            chesta,
            naisargika,
            drik,
            total_virupa: 0.0,
            total_rupa: 0.0,
            required_rupa: REQUIRED_RUPA[gi],
            ratio: 0.0,
            status: StrengthStatus::Weak,
        };
        result.refresh_totals();
        Some(result)
    }

    fn refresh_totals(&mut self) {
        self.total_virupa =
            self.sthana.total + self.dig + self.kala.total + self.chesta + self.naisargika + self.drik;
        self.total_rupa = self.total_virupa / VIRUPA_PER_RUPA;
        self.ratio = self.total_rupa / self.required_rupa;
        self.status = if self.ratio >= 1.0 {
            StrengthStatus::Strong
        } else {
            StrengthStatus::Weak
        };
    }

    fn apply_war_penalty(&mut self, penalty: f64) {
        self.kala.yuddha = -penalty;
        self.kala.total -= penalty;
        self.refresh_totals();
    }

    pub fn is_strong(&self) -> bool {
        self.status == StrengthStatus::Strong
    }
}

/// Shadbala of the seven classical grahas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadbalaTable {
    entries: [ShadbalaResult; 7],
}

impl ShadbalaTable {
    /// Entry for `graha`; `None` for Rahu and Ketu.
    pub fn get(&self, graha: Graha) -> Option<&ShadbalaResult> {
        graha.sapta_index().map(|i| &self.entries[i])
    }

    /// Entries in order Sun..Saturn.
    pub fn entries(&self) -> &[ShadbalaResult; 7] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShadbalaResult> {
        self.entries.iter()
    }

    /// Graha with the highest ratio to its requirement.
    pub fn strongest(&self) -> Graha {
        self.entries
            .iter()
            .max_by(|a, b| a.ratio.total_cmp(&b.ratio))
            .map_or(Graha::Surya, |r| r.graha)
    }
}

fn shadbala_without_war(
    position: &GrahaPosition,
    positions: &GrahaPositions,
    ctx: &KalaContext,
    ascendant_rashi: u8,
    varga_rashis: &[[u8; 7]; 7],
    aspects: &DrishtiMatrix,
) -> Option<ShadbalaResult> {
    let graha = position.graha;
    let house = assign_house(position.rashi_index(), ascendant_rashi);
    ShadbalaResult::new(
        graha,
        sthana_bala(position, house, varga_rashis)?,
        dig_bala(graha, house)?,
        kala_bala(graha, ctx)?,
        chesta_bala(graha, position.daily_speed, is_combust_in(graha, positions))?,
        naisargika_bala(graha)?,
        drik_bala(graha, aspects, ctx.moon_sun_elongation)?,
    )
}

/// Shadbala for all seven classical grahas.
///
/// Needs all nine grahas: the nodes cast aspects for Drik Bala. The war
/// penalty is applied in a second pass, to the loser only, as the absolute
/// difference of the two combatants' first-pass totals.
#[tracing::instrument(level = "debug", skip_all)]
pub fn compute_shadbala(
    positions: &GrahaPositions,
    birth: &BirthContext,
) -> Result<ShadbalaTable, JyotishError> {
    for graha in ALL_GRAHAS {
        positions.require(graha)?;
    }
    let ctx = KalaContext::new(positions, birth)?;
    let varga_rashis = saptavarga_rashis(positions)?;
    let aspects = drishti_matrix(positions);
    let ascendant_rashi = birth.ascendant_rashi();

    let mut entries = Vec::with_capacity(7);
    for graha in SAPTA_GRAHAS {
        let position = positions.require(graha)?;
        let result =
            shadbala_without_war(position, positions, &ctx, ascendant_rashi, &varga_rashis, &aspects)
                .ok_or(JyotishError::InvalidInput("shadbala undefined for graha"))?;
        entries.push(result);
    }
    let mut entries: [ShadbalaResult; 7] = entries
        .try_into()
        .map_err(|_| JyotishError::InvalidInput("shadbala table incomplete"))?;

    let first_pass = entries;
    for (gi, graha) in SAPTA_GRAHAS.iter().enumerate() {
        let Some(war) = war_state(*graha, positions) else {
            continue;
        };
        if war.role != WarRole::Loser {
            continue;
        }
        let Some(wi) = war.opponent.sapta_index() else {
            continue;
        };
        let penalty = (first_pass[wi].total_virupa - first_pass[gi].total_virupa).abs();
        tracing::debug!(loser = %graha, winner = %war.opponent, penalty, "yuddha bala penalty");
        entries[gi].apply_war_penalty(penalty);
    }

    Ok(ShadbalaTable { entries })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
