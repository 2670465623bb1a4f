//! Nakshatra-based dasha systems sharing the lazy tree arithmetic.

use serde::{Deserialize, Serialize};

use crate::graha::Graha;

use super::types::MS_PER_YEAR;
use super::vimshottari::{CYCLE_YEARS, PREFIX_YEARS, VIMSHOTTARI_LORDS, VIMSHOTTARI_YEARS};
use super::yogini::{
    YOGINI_CYCLE_YEARS, YOGINI_LORDS, YOGINI_PREFIX_YEARS, YOGINI_YEARS, Yogini,
};

/// Period sequence a dasha tree follows.
///
/// Both systems start from the Moon's nakshatra, give every lord a whole
/// number of years, and divide each period among all lords of the cycle
/// starting with its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DashaSystem {
    /// Nine lords, 120 years.
    #[default]
    Vimshottari,
    /// Eight yoginis, 36 years.
    Yogini,
}

impl DashaSystem {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Vimshottari => "Vimshottari",
            Self::Yogini => "Yogini",
        }
    }

    /// Lords in sequence order.
    pub const fn lords(self) -> &'static [Graha] {
        match self {
            Self::Vimshottari => &VIMSHOTTARI_LORDS,
            Self::Yogini => &YOGINI_LORDS,
        }
    }

    /// Period years, in sequence order.
    pub const fn years(self) -> &'static [u16] {
        match self {
            Self::Vimshottari => &VIMSHOTTARI_YEARS,
            Self::Yogini => &YOGINI_YEARS,
        }
    }

    const fn prefix_years(self) -> &'static [u16] {
        match self {
            Self::Vimshottari => &PREFIX_YEARS,
            Self::Yogini => &YOGINI_PREFIX_YEARS,
        }
    }

    /// Periods per cycle, which is also the number of sub-periods.
    pub const fn len(self) -> usize {
        self.lords().len()
    }

    pub const fn cycle_years(self) -> u16 {
        match self {
            Self::Vimshottari => CYCLE_YEARS,
            Self::Yogini => YOGINI_CYCLE_YEARS,
        }
    }

    pub const fn cycle_ms(self) -> i64 {
        self.cycle_years() as i64 * MS_PER_YEAR
    }

    /// Sequence position of the lord ruling `nakshatra_index` at birth.
    pub const fn starting_index(self, nakshatra_index: u8) -> usize {
        match self {
            Self::Vimshottari => (nakshatra_index % 9) as usize,
            Self::Yogini => Yogini::for_nakshatra(nakshatra_index).index() as usize,
        }
    }

    /// Position of `lord` in the sequence; `None` when it rules no period.
    pub fn sequence_index(self, lord: Graha) -> Option<usize> {
        self.lords().iter().position(|g| *g == lord)
    }

    /// Years of the period at sequence position `index`.
    pub const fn years_at(self, index: usize) -> u16 {
        self.years()[index % self.len()]
    }

    /// Years covered by `count` consecutive lords starting at sequence
    /// position `start`, wrapping around the cycle. `count` is at most
    /// [`Self::len`].
    pub const fn rotated_years(self, start: usize, count: usize) -> u16 {
        let n = self.len();
        let prefix = self.prefix_years();
        let start = start % n;
        let end = start + count;
        if end <= n {
            prefix[end] - prefix[start]
        } else {
            (self.cycle_years() - prefix[start]) + prefix[end - n]
        }
    }
}

impl std::fmt::Display for DashaSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
