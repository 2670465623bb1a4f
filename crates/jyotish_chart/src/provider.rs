//! Ephemeris provider seam.
//!
//! The chart pipeline never computes planetary motion itself. A provider
//! supplies tropical longitudes, speeds and latitudes, the ayanamsa and
//! the ascendant; [`StaticProvider`] replays a fixed snapshot.

use jyotish_base::{ALL_GRAHAS, CelestialBody, GeoLocation, Graha, Instant};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Source of raw astronomical inputs for one instant.
pub trait EphemerisProvider {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Tropical position of `graha` at `instant`.
    fn position(&self, instant: Instant, graha: Graha) -> Result<CelestialBody, Self::Error>;

    /// Ayanamsa in degrees at `instant`.
    fn ayanamsa_offset(&self, instant: Instant) -> Result<f64, Self::Error>;

    /// Tropical ascendant longitude in degrees.
    fn ascendant(&self, instant: Instant, location: &GeoLocation) -> Result<f64, Self::Error>;
}

impl<P: EphemerisProvider + ?Sized> EphemerisProvider for &P {
    type Error = P::Error;

    fn position(&self, instant: Instant, graha: Graha) -> Result<CelestialBody, Self::Error> {
        (**self).position(instant, graha)
    }

    fn ayanamsa_offset(&self, instant: Instant) -> Result<f64, Self::Error> {
        (**self).ayanamsa_offset(instant)
    }

    fn ascendant(&self, instant: Instant, location: &GeoLocation) -> Result<f64, Self::Error> {
        (**self).ascendant(instant, location)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StaticProviderError {
    #[error("no recorded position for {0}")]
    MissingBody(Graha),
    #[error("no recorded ascendant")]
    MissingAscendant,
}

/// Provider that answers every instant from one recorded snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticProvider {
    ayanamsa: f64,
    ascendant: Option<f64>,
    bodies: Vec<CelestialBody>,
}

impl StaticProvider {
    pub fn new(ayanamsa: f64) -> Self {
        Self {
            ayanamsa,
            ..Self::default()
        }
    }

    pub fn with_ascendant(mut self, tropical_lon: f64) -> Self {
        self.ascendant = Some(tropical_lon);
        self
    }

    /// Record `body`, replacing any earlier entry for the same graha.
    pub fn with_body(mut self, body: CelestialBody) -> Self {
        self.bodies.retain(|b| b.graha != body.graha);
        self.bodies.push(body);
        self
    }

    pub fn without_body(mut self, graha: Graha) -> Self {
        self.bodies.retain(|b| b.graha != graha);
        self
    }

    pub fn from_bodies<I>(ayanamsa: f64, ascendant: f64, bodies: I) -> Self
    where
        I: IntoIterator<Item = CelestialBody>,
    {
        bodies
            .into_iter()
            .fold(Self::new(ayanamsa).with_ascendant(ascendant), Self::with_body)
    }

    /// True when all nine grahas are recorded.
    pub fn is_complete(&self) -> bool {
        ALL_GRAHAS
            .iter()
            .all(|g| self.bodies.iter().any(|b| b.graha == *g))
    }
}

impl EphemerisProvider for StaticProvider {
    type Error = StaticProviderError;

    fn position(&self, _instant: Instant, graha: Graha) -> Result<CelestialBody, Self::Error> {
        self.bodies
            .iter()
            .find(|b| b.graha == graha)
            .copied()
            .ok_or(StaticProviderError::MissingBody(graha))
    }

    fn ayanamsa_offset(&self, _instant: Instant) -> Result<f64, Self::Error> {
        Ok(self.ayanamsa)
    }

    fn ascendant(&self, _instant: Instant, _location: &GeoLocation) -> Result<f64, Self::Error> {
        self.ascendant.ok_or(StaticProviderError::MissingAscendant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(graha: Graha, lon: f64) -> CelestialBody {
        CelestialBody {
            graha,
            tropical_longitude: lon,
            daily_speed: 1.0,
            latitude: 0.0,
        }
    }

    #[test]
    fn later_body_replaces_earlier() {
        let p = StaticProvider::new(24.0)
            .with_body(body(Graha::Surya, 10.0))
            .with_body(body(Graha::Surya, 20.0));
        let sun = p.position(Instant::from_unix_millis(0), Graha::Surya).unwrap();
        assert_eq!(sun.tropical_longitude, 20.0);
    }

    #[test]
    fn missing_body_is_an_error() {
        let p = StaticProvider::new(24.0).with_ascendant(100.0);
        assert_eq!(
            p.position(Instant::from_unix_millis(0), Graha::Ketu),
            Err(StaticProviderError::MissingBody(Graha::Ketu))
        );
        assert!(!p.is_complete());
    }

    #[test]
    fn missing_ascendant_is_an_error() {
        let p = StaticProvider::new(24.0);
        let loc = GeoLocation::new(0.0, 0.0, 0.0).unwrap();
        assert!(p.ascendant(Instant::from_unix_millis(0), &loc).is_err());
    }

    #[test]
    fn complete_snapshot() {
        let p = StaticProvider::from_bodies(
            24.0,
            100.0,
            ALL_GRAHAS.iter().map(|g| body(*g, g.index() as f64 * 40.0)),
        );
        assert!(p.is_complete());
        assert_eq!(p.ayanamsa_offset(Instant::from_unix_millis(0)), Ok(24.0));
    }
}
