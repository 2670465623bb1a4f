//! Core types for Vimshottari dasha periods.

use serde::{Deserialize, Serialize};

use crate::graha::Graha;
use crate::time::Instant;

/// One classical year (365.25 days) in milliseconds.
pub const MS_PER_YEAR: i64 = 31_557_600_000;

/// Hierarchical dasha levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum DashaLevel {
    Mahadasha = 0,
    Antardasha = 1,
    Pratyantardasha = 2,
}

impl DashaLevel {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mahadasha => "Mahadasha",
            Self::Antardasha => "Antardasha",
            Self::Pratyantardasha => "Pratyantardasha",
        }
    }

    /// Next deeper level, if any.
    pub const fn child_level(self) -> Option<Self> {
        match self {
            Self::Mahadasha => Some(Self::Antardasha),
            Self::Antardasha => Some(Self::Pratyantardasha),
            Self::Pratyantardasha => None,
        }
    }
}

/// Index path of a period inside the tree.
///
/// `mahadasha` counts from the birth mahadasha (0); the sub-indices are
/// positions among siblings, counted from the parent's own lord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodPath {
    pub mahadasha: u64,
    pub antardasha: Option<u8>,
    pub pratyantardasha: Option<u8>,
}

/// A single dasha period, `[start, end)`.
///
/// Parents are not referenced directly; [`super::DashaTree::parent`]
/// recomputes them from `path`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashaPeriod {
    pub lord: Graha,
    pub level: DashaLevel,
    /// Inclusive.
    pub start: Instant,
    /// Exclusive.
    pub end: Instant,
    pub path: PeriodPath,
}

impl DashaPeriod {
    pub fn duration_ms(&self) -> i64 {
        self.end.unix_millis() - self.start.unix_millis()
    }

    pub fn duration_years(&self) -> f64 {
        self.duration_ms() as f64 / MS_PER_YEAR as f64
    }

    pub fn contains(&self, t: Instant) -> bool {
        self.start <= t && t < self.end
    }
}

/// Active periods at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashaSnapshot {
    pub query: Instant,
    pub mahadasha: DashaPeriod,
    pub antardasha: DashaPeriod,
    pub pratyantardasha: DashaPeriod,
}

impl DashaSnapshot {
    /// Lords of the three active levels, outermost first.
    pub fn lords(&self) -> [Graha; 3] {
        [
            self.mahadasha.lord,
            self.antardasha.lord,
            self.pratyantardasha.lord,
        ]
    }
}
