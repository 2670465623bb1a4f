//! Yogini sequence data.
//!
//! Eight yoginis of 1..8 years, 36 years per cycle. The birth yogini is
//! `(nakshatra_index + 3) % 8`, so Ashwini starts in Bhramari.

use serde::{Deserialize, Serialize};

use crate::graha::Graha;

/// The eight yoginis in sequence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Yogini {
    Mangala,
    Pingala,
    Dhanya,
    Bhramari,
    Bhadrika,
    Ulka,
    Siddha,
    Sankata,
}

pub const ALL_YOGINIS: [Yogini; 8] = [
    Yogini::Mangala,
    Yogini::Pingala,
    Yogini::Dhanya,
    Yogini::Bhramari,
    Yogini::Bhadrika,
    Yogini::Ulka,
    Yogini::Siddha,
    Yogini::Sankata,
];

/// Graha lord of each yogini, in sequence order.
pub const YOGINI_LORDS: [Graha; 8] = [
    Graha::Chandra,
    Graha::Surya,
    Graha::Guru,
    Graha::Mangal,
    Graha::Buddh,
    Graha::Shani,
    Graha::Shukra,
    Graha::Rahu,
];

/// Period years, in sequence order.
pub const YOGINI_YEARS: [u16; 8] = [1, 2, 3, 4, 5, 6, 7, 8];

pub const YOGINI_CYCLE_YEARS: u16 = 36;

pub(super) const YOGINI_PREFIX_YEARS: [u16; 9] = [0, 1, 3, 6, 10, 15, 21, 28, 36];

impl Yogini {
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Mangala => "Mangala",
            Self::Pingala => "Pingala",
            Self::Dhanya => "Dhanya",
            Self::Bhramari => "Bhramari",
            Self::Bhadrika => "Bhadrika",
            Self::Ulka => "Ulka",
            Self::Siddha => "Siddha",
            Self::Sankata => "Sankata",
        }
    }

    pub const fn lord(self) -> Graha {
        YOGINI_LORDS[self.index() as usize]
    }

    pub const fn years(self) -> u16 {
        YOGINI_YEARS[self.index() as usize]
    }

    /// Yogini ruled by `lord`; `None` for Ketu, which rules none.
    pub fn from_lord(lord: Graha) -> Option<Self> {
        ALL_YOGINIS.into_iter().find(|y| y.lord() == lord)
    }

    /// Birth yogini for a 0-based nakshatra index.
    pub const fn for_nakshatra(nakshatra_index: u8) -> Self {
        ALL_YOGINIS[((nakshatra_index % 27 + 3) % 8) as usize]
    }
}

impl std::fmt::Display for Yogini {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
