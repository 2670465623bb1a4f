//! Error types for chart orchestration.

use std::fmt;

use jyotish_base::{Graha, JyotishError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that abort a whole chart, or config loading.
///
/// Per-planet and per-engine failures do not abort the chart; they are
/// recorded in the aggregate as [`StageError`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChartError {
    #[error("ayanamsa lookup failed: {0}")]
    Ayanamsa(String),
    #[error("ascendant lookup failed: {0}")]
    Ascendant(String),
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    #[error("cannot read config: {0}")]
    ConfigIo(#[from] std::io::Error),
    #[error("cannot parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error(transparent)]
    Jyotish(#[from] JyotishError),
}

/// Step of the chart pipeline that can fail in isolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Position(Graha),
    Dignity(Graha),
    Dasha,
    YoginiDasha,
    Ashtakavarga,
    Shadbala,
    Phala,
    Vimsopaka,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Position(g) => write!(f, "position of {g}"),
            Self::Dignity(g) => write!(f, "dignity of {g}"),
            Self::Dasha => f.write_str("dasha"),
            Self::YoginiDasha => f.write_str("yogini dasha"),
            Self::Ashtakavarga => f.write_str("ashtakavarga"),
            Self::Shadbala => f.write_str("shadbala"),
            Self::Phala => f.write_str("phala"),
            Self::Vimsopaka => f.write_str("vimsopaka"),
        }
    }
}

/// A failure confined to one planet or one engine.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{stage} failed: {message}")]
pub struct StageError {
    pub stage: Stage,
    pub message: String,
}

impl StageError {
    pub fn new(stage: Stage, err: impl fmt::Display) -> Self {
        Self {
            stage,
            message: err.to_string(),
        }
    }
}
