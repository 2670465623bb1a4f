//! Vimshottari sequence data.

use crate::graha::Graha;

/// Lord sequence: Ketu, Shukra, Surya, Chandra, Mangal, Rahu, Guru, Shani, Buddh.
pub const VIMSHOTTARI_LORDS: [Graha; 9] = [
    Graha::Ketu,
    Graha::Shukra,
    Graha::Surya,
    Graha::Chandra,
    Graha::Mangal,
    Graha::Rahu,
    Graha::Guru,
    Graha::Shani,
    Graha::Buddh,
];

/// Mahadasha years per lord, in sequence order.
pub const VIMSHOTTARI_YEARS: [u16; 9] = [7, 20, 6, 10, 7, 18, 16, 19, 17];

/// Length of one full cycle in years.
pub const CYCLE_YEARS: u16 = 120;

/// `PREFIX_YEARS[i]` = sum of the first `i` entries of [`VIMSHOTTARI_YEARS`].
pub(super) const PREFIX_YEARS: [u16; 10] = [0, 7, 27, 33, 43, 50, 68, 84, 103, 120];

/// Position of `lord` in the sequence.
const fn sequence_index(lord: Graha) -> usize {
    match lord {
        Graha::Ketu => 0,
        Graha::Shukra => 1,
        Graha::Surya => 2,
        Graha::Chandra => 3,
        Graha::Mangal => 4,
        Graha::Rahu => 5,
        Graha::Guru => 6,
        Graha::Shani => 7,
        Graha::Buddh => 8,
    }
}

/// Starting lord for a nakshatra: every ninth nakshatra shares a lord.
pub const fn nakshatra_lord(nakshatra_index: u8) -> Graha {
    VIMSHOTTARI_LORDS[(nakshatra_index % 9) as usize]
}

/// Mahadasha years of `lord`.
pub const fn lord_years(lord: Graha) -> u16 {
    VIMSHOTTARI_YEARS[sequence_index(lord)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn years_sum_to_cycle() {
        let total: u16 = VIMSHOTTARI_YEARS.iter().sum();
        assert_eq!(total, CYCLE_YEARS);
    }

    #[test]
    fn prefix_matches_years() {
        for i in 0..9 {
            assert_eq!(PREFIX_YEARS[i + 1] - PREFIX_YEARS[i], VIMSHOTTARI_YEARS[i]);
        }
    }

    #[test]
    fn nakshatra_lords_cycle() {
        assert_eq!(nakshatra_lord(0), Graha::Ketu);
        assert_eq!(nakshatra_lord(1), Graha::Shukra);
        assert_eq!(nakshatra_lord(9), Graha::Ketu);
        assert_eq!(nakshatra_lord(26), Graha::Buddh);
    }

    #[test]
    fn sequence_index_roundtrip() {
        for (i, g) in VIMSHOTTARI_LORDS.iter().enumerate() {
            assert_eq!(sequence_index(*g), i);
        }
    }
}
