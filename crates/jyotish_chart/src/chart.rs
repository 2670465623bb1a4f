//! Whole-chart pipeline: provider, normalizer, per-planet classification,
//! then the dasha, ashtakavarga, shadbala, phala and vimsopaka engines.

use jyotish_base::{
    ALL_GRAHAS, AshtakavargaResult, BirthContext, CelestialBody, DashaSnapshot, DashaTree,
    DignityResult, GeoLocation, Graha, GrahaPosition, GrahaPositions, Instant, JyotishError,
    PhalaTable, ShadbalaTable, SiderealPosition, VimsopakaTable, assign_house, build_dasha_tree,
    build_yogini_tree, classify_dignity, compute_ashtakavarga, compute_phala, compute_shadbala,
    compute_vimsopaka, normalize,
};
use serde::{Deserialize, Serialize};

use crate::config::ChartConfig;
use crate::error::{ChartError, Stage, StageError};
use crate::provider::EphemerisProvider;

/// Birth instant and place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartRequest {
    pub instant: Instant,
    pub location: GeoLocation,
}

impl ChartRequest {
    pub fn new(instant: Instant, location: GeoLocation) -> Self {
        Self { instant, location }
    }
}

/// One graha, fully classified.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanetReading {
    pub graha: Graha,
    pub body: CelestialBody,
    pub position: SiderealPosition,
    /// Whole-sign house from the ascendant, 1-12.
    pub house: u8,
    pub dignity: DignityResult,
}

pub type PlanetEntry = Result<PlanetReading, StageError>;

/// Dasha tree plus the periods running at birth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashaReading {
    pub tree: DashaTree,
    pub at_birth: DashaSnapshot,
}

/// Result aggregate for one chart.
///
/// Engine fields are `None` when the engine was switched off, and
/// `Some(Err(_))` when it ran and failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartAnalysis {
    pub request: ChartRequest,
    pub ayanamsa: f64,
    pub ascendant: SiderealPosition,
    /// One entry per graha, in graha order.
    pub planets: Vec<PlanetEntry>,
    pub dasha: Option<Result<DashaReading, StageError>>,
    pub yogini_dasha: Option<Result<DashaReading, StageError>>,
    pub ashtakavarga: Option<Result<AshtakavargaResult, StageError>>,
    pub shadbala: Option<Result<ShadbalaTable, StageError>>,
    pub phala: Option<Result<PhalaTable, StageError>>,
    pub vimsopaka: Option<Result<VimsopakaTable, StageError>>,
}

impl ChartAnalysis {
    pub fn planet(&self, graha: Graha) -> Option<&PlanetReading> {
        self.planets
            .get(graha.index() as usize)
            .and_then(|e| e.as_ref().ok())
    }

    /// Every recorded per-planet and per-engine failure.
    pub fn failures(&self) -> impl Iterator<Item = &StageError> {
        let engines = [
            self.dasha.as_ref().and_then(|r| r.as_ref().err()),
            self.yogini_dasha.as_ref().and_then(|r| r.as_ref().err()),
            self.ashtakavarga.as_ref().and_then(|r| r.as_ref().err()),
            self.shadbala.as_ref().and_then(|r| r.as_ref().err()),
            self.phala.as_ref().and_then(|r| r.as_ref().err()),
            self.vimsopaka.as_ref().and_then(|r| r.as_ref().err()),
        ];
        self.planets
            .iter()
            .filter_map(|e| e.as_ref().err())
            .chain(engines.into_iter().flatten())
    }

    pub fn is_complete(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Run `f` for `stage` when `include` is set, recording a failure
/// instead of propagating it.
fn run_engine<T>(
    stage: Stage,
    include: bool,
    f: impl FnOnce() -> Result<T, JyotishError>,
) -> Option<Result<T, StageError>> {
    if !include {
        tracing::debug!(%stage, "engine disabled");
        return None;
    }
    Some(f().map_err(|e| {
        tracing::warn!(%stage, error = %e, "engine failed");
        StageError::new(stage, e)
    }))
}

fn classify(
    pos: &GrahaPosition,
    body: CelestialBody,
    positions: &GrahaPositions,
    ascendant_rashi: u8,
) -> PlanetEntry {
    let dignity = classify_dignity(pos.graha, &pos.sidereal, positions)
        .map_err(|e| StageError::new(Stage::Dignity(pos.graha), e))?;
    Ok(PlanetReading {
        graha: pos.graha,
        body,
        position: pos.sidereal,
        house: assign_house(pos.rashi_index(), ascendant_rashi),
        dignity,
    })
}

/// Compute a full chart.
///
/// Only the ayanamsa and ascendant lookups abort the chart. A failed
/// planet is recorded in its entry; engines that need it record their own
/// failure while the others still run.
#[tracing::instrument(level = "debug", skip(provider, config), fields(instant = %request.instant))]
pub fn compute_chart<P: EphemerisProvider>(
    provider: &P,
    request: &ChartRequest,
    config: &ChartConfig,
) -> Result<ChartAnalysis, ChartError> {
    config.validate()?;
    let instant = request.instant;

    let ayanamsa = provider
        .ayanamsa_offset(instant)
        .map_err(|e| ChartError::Ayanamsa(e.to_string()))?;
    let asc_tropical = provider
        .ascendant(instant, &request.location)
        .map_err(|e| ChartError::Ascendant(e.to_string()))?;
    let ascendant = normalize(asc_tropical, ayanamsa)?;

    let mut positions = GrahaPositions::new();
    let mut raw: Vec<Result<CelestialBody, StageError>> = Vec::with_capacity(ALL_GRAHAS.len());
    for graha in ALL_GRAHAS {
        let entry = provider
            .position(instant, graha)
            .map_err(|e| StageError::new(Stage::Position(graha), e))
            .and_then(|body| {
                GrahaPosition::from_body(&body, ayanamsa)
                    .map(|pos| {
                        positions.insert(pos);
                        body
                    })
                    .map_err(|e| StageError::new(Stage::Position(graha), e))
            });
        if let Err(e) = &entry {
            tracing::warn!(%graha, error = %e.message, "position unavailable");
        }
        raw.push(entry);
    }

    let planets: Vec<PlanetEntry> = ALL_GRAHAS
        .iter()
        .zip(raw)
        .map(|(graha, body)| {
            let body = body?;
            let pos = positions
                .require(*graha)
                .map_err(|e| StageError::new(Stage::Position(*graha), e))?;
            let entry = classify(pos, body, &positions, ascendant.rashi_index);
            if let Err(e) = &entry {
                tracing::warn!(%graha, error = %e.message, "classification failed");
            }
            entry
        })
        .collect();

    let dasha = run_engine(Stage::Dasha, config.include_dasha, || {
        let moon = positions.require(Graha::Chandra)?;
        let tree = build_dasha_tree(&moon.sidereal, instant, config.dasha.horizon_years)?;
        let at_birth = tree.query(instant)?;
        Ok(DashaReading { tree, at_birth })
    });

    let yogini_dasha = run_engine(Stage::YoginiDasha, config.include_yogini_dasha, || {
        let moon = positions.require(Graha::Chandra)?;
        let tree = build_yogini_tree(&moon.sidereal, instant, config.dasha.horizon_years)?;
        let at_birth = tree.query(instant)?;
        Ok(DashaReading { tree, at_birth })
    });

    let ashtakavarga = run_engine(Stage::Ashtakavarga, config.include_ashtakavarga, || {
        compute_ashtakavarga(&positions, ascendant.rashi_index)
    });

    let birth = BirthContext::new(instant, request.location, ascendant.longitude);
    let shadbala = run_engine(Stage::Shadbala, config.include_shadbala, || {
        compute_shadbala(&positions, &birth)
    });

    let phala = match (&shadbala, config.include_phala) {
        (_, false) => None,
        (Some(Ok(table)), true) => Some(Ok(compute_phala(table))),
        (_, true) => {
            tracing::warn!("phala skipped: shadbala unavailable");
            Some(Err(StageError::new(Stage::Phala, "shadbala unavailable")))
        }
    };

    let vimsopaka = run_engine(Stage::Vimsopaka, config.include_vimsopaka, || {
        compute_vimsopaka(&positions, config.vimsopaka.scheme)
    });

    let analysis = ChartAnalysis {
        request: *request,
        ayanamsa,
        ascendant,
        planets,
        dasha,
        yogini_dasha,
        ashtakavarga,
        shadbala,
        phala,
        vimsopaka,
    };
    tracing::debug!(
        failures = analysis.failures().count(),
        ascendant = %analysis.ascendant.rashi,
        "chart computed"
    );
    Ok(analysis)
}
