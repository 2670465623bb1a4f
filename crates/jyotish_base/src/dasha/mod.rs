//! Vimshottari and Yogini dasha (planetary period) calculations.
//!
//! Three hierarchical levels are supported: mahadasha, antardasha and
//! pratyantardasha. The tree is built lazily from the birth balance and
//! answers point queries by direct arithmetic, so horizons of many
//! cycles cost no more than a single cycle.

pub mod balance;
pub mod system;
pub mod tree;
pub mod types;
pub mod vimshottari;
pub mod yogini;

pub use balance::BirthBalance;
pub use system::DashaSystem;
pub use tree::DashaTree;
pub use types::{DashaLevel, DashaPeriod, DashaSnapshot, MS_PER_YEAR, PeriodPath};
pub use vimshottari::{
    CYCLE_YEARS, VIMSHOTTARI_LORDS, VIMSHOTTARI_YEARS, lord_years, nakshatra_lord,
};
pub use yogini::{ALL_YOGINIS, YOGINI_CYCLE_YEARS, YOGINI_LORDS, YOGINI_YEARS, Yogini};

use crate::error::JyotishError;
use crate::position::SiderealPosition;
use crate::time::Instant;

/// Build a Vimshottari tree from the Moon's sidereal position at birth.
///
/// `horizon_years` bounds the tree: queries at or after
/// `birth + horizon_years` fail with [`JyotishError::OutOfRange`].
pub fn build_dasha_tree(
    moon: &SiderealPosition,
    birth: Instant,
    horizon_years: f64,
) -> Result<DashaTree, JyotishError> {
    build_tree(DashaSystem::Vimshottari, moon, birth, horizon_years)
}

/// Build a Yogini tree from the Moon's sidereal position at birth.
///
/// Same horizon semantics as [`build_dasha_tree`].
pub fn build_yogini_tree(
    moon: &SiderealPosition,
    birth: Instant,
    horizon_years: f64,
) -> Result<DashaTree, JyotishError> {
    build_tree(DashaSystem::Yogini, moon, birth, horizon_years)
}

/// Build a tree for any supported system.
pub fn build_tree(
    system: DashaSystem,
    moon: &SiderealPosition,
    birth: Instant,
    horizon_years: f64,
) -> Result<DashaTree, JyotishError> {
    let balance = BirthBalance::for_system(system, moon)?;
    tracing::debug!(
        %system,
        lord = %balance.lord,
        nakshatra = %balance.nakshatra,
        remaining_years = balance.remaining_years,
        "dasha birth balance"
    );
    DashaTree::new(balance, birth, horizon_years)
}

/// Active mahadasha, antardasha and pratyantardasha at `t`.
pub fn query_dasha(tree: &DashaTree, t: Instant) -> Result<DashaSnapshot, JyotishError> {
    tree.query(t)
}
