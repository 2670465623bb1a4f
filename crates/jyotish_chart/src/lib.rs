//! Chart orchestration over an ephemeris provider.
//!
//! This crate provides:
//! - The [`EphemerisProvider`] trait and an in-memory [`StaticProvider`]
//! - TOML-backed [`ChartConfig`]
//! - [`compute_chart`], which runs every jyotish engine for one birth and
//!   records per-planet and per-engine failures without aborting

pub mod chart;
pub mod config;
pub mod error;
pub mod provider;

pub use chart::{
    ChartAnalysis, ChartRequest, DashaReading, PlanetEntry, PlanetReading, compute_chart,
};
pub use config::{ChartConfig, DashaConfig, VimsopakaConfig};
pub use error::{ChartError, Stage, StageError};
pub use provider::{EphemerisProvider, StaticProvider, StaticProviderError};
