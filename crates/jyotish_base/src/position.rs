//! Position normalizer: tropical longitude plus ayanamsa to sidereal
//! sign, nakshatra and pada.

use serde::{Deserialize, Serialize};

use crate::error::JyotishError;
use crate::graha::{ALL_GRAHAS, Graha};
use crate::nakshatra::{NAKSHATRA_SPAN, Nakshatra};
use crate::rashi::{RASHI_SPAN, Rashi};
use crate::util::{ensure_finite, normalize_360};

/// Provider output for one body at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CelestialBody {
    pub graha: Graha,
    /// Tropical ecliptic longitude in degrees.
    pub tropical_longitude: f64,
    /// Signed daily motion in degrees/day; negative means retrograde.
    pub daily_speed: f64,
    /// Ecliptic latitude in degrees.
    pub latitude: f64,
}

/// Sidereal placement derived from a single longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiderealPosition {
    /// Sidereal longitude in [0, 360).
    pub longitude: f64,
    pub rashi: Rashi,
    /// 0-based rashi index (0 = Mesha).
    pub rashi_index: u8,
    /// Degrees within the rashi [0, 30).
    pub degree_in_rashi: f64,
    pub nakshatra: Nakshatra,
    /// 0-based nakshatra index (0 = Ashwini).
    pub nakshatra_index: u8,
    /// Pada within the nakshatra, 1-4.
    pub pada: u8,
}

/// Padas in the full circle; one rashi holds exactly nine.
const PADAS_PER_CIRCLE: f64 = 108.0;

/// Pada boundaries within this many quarters below an exact multiple
/// snap up to it.
const QUARTER_SNAP: f64 = 1e-9;

/// Longitude in pada units, `lon * 108 / 360`. Exact at whole-degree
/// pada starts.
fn quarters(lon: f64) -> f64 {
    lon * PADAS_PER_CIRCLE / 360.0
}

fn quarter_index(quarters: f64) -> u8 {
    let nearest = quarters.round();
    let q = if (quarters - nearest).abs() < QUARTER_SNAP {
        nearest
    } else {
        quarters.floor()
    };
    (q.max(0.0) as u8).min(107)
}

impl SiderealPosition {
    /// Derive sign, nakshatra and pada from a sidereal longitude.
    ///
    /// Any finite real wraps into [0, 360); only NaN and infinities fail.
    /// Rashi, nakshatra and pada all come from one pada count, so they
    /// never disagree at a shared boundary.
    pub fn from_longitude(sidereal_lon_deg: f64) -> Result<Self, JyotishError> {
        let lon = normalize_360(ensure_finite(sidereal_lon_deg, "longitude is not finite")?);

        let q = quarter_index(quarters(lon));
        let rashi_index = q / 9;
        let nakshatra_index = q / 4;
        let pada = q % 4 + 1;
        let degree_in_rashi = (lon - rashi_index as f64 * RASHI_SPAN).clamp(0.0, RASHI_SPAN);

        Ok(Self {
            longitude: lon,
            rashi: Rashi::from_index(rashi_index),
            rashi_index,
            degree_in_rashi,
            nakshatra: Nakshatra::from_index(nakshatra_index),
            nakshatra_index,
            pada,
        })
    }

    /// Fraction of the current nakshatra already traversed, [0, 1).
    pub fn nakshatra_fraction(&self) -> f64 {
        let start = self.nakshatra_index as f64 * 4.0;
        ((quarters(self.longitude) - start) / 4.0).clamp(0.0, 1.0 - f64::EPSILON)
    }

    /// Degrees already traversed inside the current nakshatra.
    pub fn degrees_in_nakshatra(&self) -> f64 {
        self.nakshatra_fraction() * NAKSHATRA_SPAN
    }
}

/// Normalize a tropical longitude to a sidereal position.
///
/// `sidereal = normalize(tropical - ayanamsa)`. Both operands are reduced
/// first so that huge finite inputs cannot overflow the difference.
pub fn normalize(tropical_lon_deg: f64, ayanamsa_deg: f64) -> Result<SiderealPosition, JyotishError> {
    let tropical = ensure_finite(tropical_lon_deg, "tropical longitude is not finite")?;
    let aya = ensure_finite(ayanamsa_deg, "ayanamsa is not finite")?;
    SiderealPosition::from_longitude(normalize_360(tropical) - normalize_360(aya))
}

/// A graha with both its raw provider data and its sidereal placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrahaPosition {
    pub graha: Graha,
    pub tropical_longitude: f64,
    pub sidereal: SiderealPosition,
    pub daily_speed: f64,
    pub latitude: f64,
}

impl GrahaPosition {
    pub fn from_body(body: &CelestialBody, ayanamsa_deg: f64) -> Result<Self, JyotishError> {
        let sidereal = normalize(body.tropical_longitude, ayanamsa_deg)?;
        let daily_speed = ensure_finite(body.daily_speed, "daily speed is not finite")?;
        let latitude = ensure_finite(body.latitude, "latitude is not finite")?;
        Ok(Self {
            graha: body.graha,
            tropical_longitude: normalize_360(body.tropical_longitude),
            sidereal,
            daily_speed,
            latitude,
        })
    }

    pub fn is_retrograde(&self) -> bool {
        self.daily_speed < 0.0
    }

    pub fn longitude(&self) -> f64 {
        self.sidereal.longitude
    }

    pub fn rashi_index(&self) -> u8 {
        self.sidereal.rashi_index
    }
}

/// Read-only snapshot of graha positions for one chart.
///
/// Entries may be missing when the provider failed for a body; engines
/// that need a body report [`JyotishError::MissingPosition`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrahaPositions {
    entries: [Option<GrahaPosition>; 9],
}

impl GrahaPositions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a full snapshot from provider bodies.
    pub fn from_bodies<'a, I>(bodies: I, ayanamsa_deg: f64) -> Result<Self, JyotishError>
    where
        I: IntoIterator<Item = &'a CelestialBody>,
    {
        let mut positions = Self::new();
        for body in bodies {
            positions.insert(GrahaPosition::from_body(body, ayanamsa_deg)?);
        }
        Ok(positions)
    }

    /// Insert or replace the entry for `pos.graha`.
    pub fn insert(&mut self, pos: GrahaPosition) {
        self.entries[pos.graha.index() as usize] = Some(pos);
    }

    pub fn get(&self, graha: Graha) -> Option<&GrahaPosition> {
        self.entries[graha.index() as usize].as_ref()
    }

    pub fn require(&self, graha: Graha) -> Result<&GrahaPosition, JyotishError> {
        self.get(graha).ok_or(JyotishError::MissingPosition(graha))
    }

    /// Present entries in graha order.
    pub fn iter(&self) -> impl Iterator<Item = &GrahaPosition> {
        self.entries.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Option::is_none)
    }

    /// True when every one of the nine grahas is present.
    pub fn is_complete(&self) -> bool {
        ALL_GRAHAS.iter().all(|g| self.get(*g).is_some())
    }
}
