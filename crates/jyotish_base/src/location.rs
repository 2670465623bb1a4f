//! Geographic location of a chart.

use serde::{Deserialize, Serialize};

use crate::error::JyotishError;

/// Geographic location on Earth's surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Geodetic latitude in degrees, north positive. Range: [-90, 90].
    pub latitude_deg: f64,
    /// Geodetic longitude in degrees, east positive. Range: [-180, 180].
    pub longitude_deg: f64,
    /// Altitude above mean sea level in meters.
    pub altitude_m: f64,
}

impl GeoLocation {
    /// Create a validated location.
    pub fn new(latitude_deg: f64, longitude_deg: f64, altitude_m: f64) -> Result<Self, JyotishError> {
        if !latitude_deg.is_finite() || !(-90.0..=90.0).contains(&latitude_deg) {
            return Err(JyotishError::InvalidInput("latitude must be within [-90, 90]"));
        }
        if !longitude_deg.is_finite() || !(-180.0..=180.0).contains(&longitude_deg) {
            return Err(JyotishError::InvalidInput("longitude must be within [-180, 180]"));
        }
        if !altitude_m.is_finite() {
            return Err(JyotishError::InvalidInput("altitude is not finite"));
        }
        Ok(Self {
            latitude_deg,
            longitude_deg,
            altitude_m,
        })
    }

    /// Offset of local mean time from UTC, in milliseconds.
    pub fn local_mean_time_offset_ms(&self) -> i64 {
        (self.longitude_deg * 240_000.0).round() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_location() {
        let loc = GeoLocation::new(28.6139, 77.209, 216.0).unwrap();
        assert!((loc.latitude_deg - 28.6139).abs() < 1e-12);
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(GeoLocation::new(91.0, 0.0, 0.0).is_err());
        assert!(GeoLocation::new(0.0, -181.0, 0.0).is_err());
        assert!(GeoLocation::new(0.0, 0.0, f64::NAN).is_err());
    }

    #[test]
    fn lmt_offset_four_minutes_per_degree() {
        let loc = GeoLocation::new(0.0, 15.0, 0.0).unwrap();
        assert_eq!(loc.local_mean_time_offset_ms(), 3_600_000);
        let west = GeoLocation::new(0.0, -1.0, 0.0).unwrap();
        assert_eq!(west.local_mean_time_offset_ms(), -240_000);
    }
}
