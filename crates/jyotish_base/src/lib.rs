//! Vedic chart analytics built on ephemeris longitudes.
//!
//! This crate provides:
//! - Sidereal normalization to rashi, nakshatra and pada
//! - Dignity, combustion and planetary-war classification
//! - Whole-sign houses and the sixteen divisional (varga) signs
//! - Vimshottari and Yogini dasha with lazy, index-addressable periods
//! - Ashtakavarga with Trikona and Ekadhipatya Shodhana
//! - Shadbala and Ishta/Kashta Phala
//! - Vimsopaka Bala over the classical varga groupings
//!
//! Everything here is pure math over immutable inputs; no I/O.

pub mod ashtakavarga;
pub mod combustion;
pub mod dasha;
pub mod dignity;
pub mod drishti;
pub mod error;
pub mod graha;
pub mod house;
pub mod kala;
pub mod location;
pub mod nakshatra;
pub mod phala;
pub mod position;
pub mod rashi;
pub mod relationships;
pub mod shadbala;
pub mod time;
pub mod util;
pub mod varga;
pub mod vimsopaka;
pub mod yuddha;

pub use ashtakavarga::{
    AshtakavargaResult, BhinnaAshtakavarga, Contributor, SarvaAshtakavarga, Shodhana,
    TransitEffect, compute_ashtakavarga, kakshya,
};
pub use combustion::{combustion_orb, is_combust};
pub use dasha::{
    BirthBalance, DashaLevel, DashaPeriod, DashaSnapshot, DashaSystem, DashaTree, MS_PER_YEAR,
    PeriodPath, Yogini, build_dasha_tree, build_tree, build_yogini_tree, query_dasha,
};
pub use dignity::{CompoundDignity, Dignity, DignityResult, classify_dignity};
pub use drishti::{DrishtiEntry, graha_drishti};
pub use error::JyotishError;
pub use graha::{ALL_GRAHAS, Graha, SAPTA_GRAHAS, rashi_lord};
pub use house::assign_house;
pub use kala::{BirthContext, KalaLords};
pub use location::GeoLocation;
pub use nakshatra::Nakshatra;
pub use phala::{PhalaCategory, PhalaResult, PhalaTable, compute_phala};
pub use position::{CelestialBody, GrahaPosition, GrahaPositions, SiderealPosition, normalize};
pub use rashi::{Rashi, SignType};
pub use shadbala::{ShadbalaResult, ShadbalaTable, StrengthStatus, compute_shadbala};
pub use time::Instant;
pub use util::{angular_separation, normalize_360};
pub use varga::Varga;
pub use vimsopaka::{
    VargaDignityEntry, VargaScheme, VimsopakaCategory, VimsopakaResult, VimsopakaTable,
    compute_vimsopaka,
};
pub use yuddha::{WarRole, WarState};
