//! Property tests for invariants that must hold for any finite input.

use jyotish_base::ashtakavarga::{SAV_TOTAL, calculate_ashtakavarga};
use jyotish_base::{
    Instant, MS_PER_YEAR, SiderealPosition, angular_separation, assign_house,
    build_dasha_tree, normalize, query_dasha,
};
use proptest::prelude::*;

/// Every finite f64 class, both signs.
fn any_finite() -> impl Strategy<Value = f64> {
    use prop::num::f64::{NEGATIVE, NORMAL, POSITIVE, SUBNORMAL, ZERO};
    POSITIVE | NEGATIVE | NORMAL | SUBNORMAL | ZERO
}

proptest! {
    #[test]
    fn normalized_longitude_in_range(tropical in -1.0e6f64..1.0e6, aya in -400.0f64..400.0) {
        let p = normalize(tropical, aya).unwrap();
        prop_assert!((0.0..360.0).contains(&p.longitude));
        prop_assert!(p.rashi_index < 12);
        prop_assert!(p.nakshatra_index < 27);
        prop_assert!((1..=4).contains(&p.pada));
        prop_assert!((0.0..30.0).contains(&p.degree_in_rashi));
    }

    #[test]
    fn any_finite_pair_normalizes(tropical in any_finite(), aya in any_finite()) {
        let p = normalize(tropical, aya).unwrap();
        prop_assert!((0.0..360.0).contains(&p.longitude));
        prop_assert!(p.nakshatra_index < 27);
        prop_assert!((0.0..30.0).contains(&p.degree_in_rashi));
    }

    #[test]
    fn pada_count_is_consistent(lon in 0.0f64..360.0) {
        let p = SiderealPosition::from_longitude(lon).unwrap();
        let q = p.nakshatra_index as u16 * 4 + (p.pada as u16 - 1);
        prop_assert_eq!(p.rashi_index as u16, q / 9);
        prop_assert!((0.0..1.0).contains(&p.nakshatra_fraction()));
    }

    #[test]
    fn separation_is_symmetric_and_bounded(a in -720.0f64..720.0, b in -720.0f64..720.0) {
        let d = angular_separation(a, b);
        prop_assert!((0.0..=180.0).contains(&d));
        prop_assert!((d - angular_separation(b, a)).abs() < 1e-9);
    }

    #[test]
    fn house_in_one_to_twelve(planet in 0u8..12, lagna in 0u8..12) {
        let h = assign_house(planet, lagna);
        prop_assert!((1..=12).contains(&h));
        prop_assert_eq!((lagna + h - 1) % 12, planet);
    }

    #[test]
    fn sav_total_is_invariant(rashis in prop::array::uniform7(0u8..12), lagna in 0u8..12) {
        let result = calculate_ashtakavarga(&rashis, lagna);
        prop_assert_eq!(result.sarva.total(), SAV_TOTAL);
        prop_assert!(result.sarva.points.iter().all(|&p| p <= 56));
        for bav in &result.bhinna {
            prop_assert!(bav.points.iter().all(|&p| p <= 8));
        }
    }

    #[test]
    fn dasha_snapshot_nests(moon in 0.0f64..360.0, offset_years in 0.0f64..119.0) {
        let birth = Instant::from_unix_millis(0);
        let moon = SiderealPosition::from_longitude(moon).unwrap();
        let tree = build_dasha_tree(&moon, birth, 120.0).unwrap();
        let t = Instant::from_unix_millis((offset_years * MS_PER_YEAR as f64) as i64);
        let snap = query_dasha(&tree, t).unwrap();

        prop_assert!(snap.mahadasha.contains(t));
        prop_assert!(snap.antardasha.contains(t));
        prop_assert!(snap.pratyantardasha.contains(t));
        prop_assert!(snap.mahadasha.start <= snap.antardasha.start);
        prop_assert!(snap.antardasha.end <= snap.mahadasha.end);
        prop_assert!(snap.antardasha.start <= snap.pratyantardasha.start);
        prop_assert!(snap.pratyantardasha.end <= snap.antardasha.end);
    }
}
