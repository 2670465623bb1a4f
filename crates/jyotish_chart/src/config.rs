//! Chart configuration, loadable from TOML.
//!
//! ```toml
//! include_shadbala = true
//! include_yogini_dasha = true
//!
//! [dasha]
//! horizon_years = 120.0
//!
//! [vimsopaka]
//! scheme = "shodasavarga"
//! ```

use std::path::Path;

use jyotish_base::VargaScheme;
use serde::{Deserialize, Serialize};

use crate::error::ChartError;

/// Dasha tree bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashaConfig {
    /// Years after birth the tree answers queries for.
    pub horizon_years: f64,
}

impl Default for DashaConfig {
    fn default() -> Self {
        Self {
            horizon_years: 120.0,
        }
    }
}

/// Varga grouping for Vimsopaka Bala.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VimsopakaConfig {
    pub scheme: VargaScheme,
}

/// Which engines a chart runs. Missing keys fall back to [`Default`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub include_dasha: bool,
    /// Second tree over the same horizon as `dasha`.
    pub include_yogini_dasha: bool,
    pub include_ashtakavarga: bool,
    pub include_shadbala: bool,
    /// Needs `include_shadbala`.
    pub include_phala: bool,
    pub include_vimsopaka: bool,
    pub dasha: DashaConfig,
    pub vimsopaka: VimsopakaConfig,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            include_dasha: true,
            include_yogini_dasha: true,
            include_ashtakavarga: true,
            include_shadbala: true,
            include_phala: true,
            include_vimsopaka: true,
            dasha: DashaConfig::default(),
            vimsopaka: VimsopakaConfig::default(),
        }
    }
}

impl ChartConfig {
    /// Parse and validate.
    pub fn from_toml_str(s: &str) -> Result<Self, ChartError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ChartError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), ?config, "loaded chart config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ChartError> {
        let h = self.dasha.horizon_years;
        if !h.is_finite() || h <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "dasha.horizon_years must be a finite positive number",
            ));
        }
        if self.include_phala && !self.include_shadbala {
            return Err(ChartError::InvalidConfig(
                "include_phala requires include_shadbala",
            ));
        }
        Ok(())
    }
}
