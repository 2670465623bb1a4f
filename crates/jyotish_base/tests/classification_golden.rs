//! Golden tests for normalization, dignity, combustion, war and houses.
//!
//! Pure math over hand-built position snapshots; no ephemeris needed.

use jyotish_base::{
    CelestialBody, Dignity, Graha, GrahaPositions, Nakshatra, Rashi, WarRole, angular_separation,
    assign_house, classify_dignity, combustion_orb, is_combust, normalize,
};

fn body(graha: Graha, lon: f64, speed: f64, lat: f64) -> CelestialBody {
    CelestialBody {
        graha,
        tropical_longitude: lon,
        daily_speed: speed,
        latitude: lat,
    }
}

fn snapshot(bodies: &[CelestialBody]) -> GrahaPositions {
    GrahaPositions::from_bodies(bodies, 0.0).unwrap()
}

// ---------------------------------------------------------------------------
// Position normalizer
// ---------------------------------------------------------------------------

#[test]
fn zero_longitude_is_ashwini_pada_one() {
    let p = normalize(0.0, 0.0).unwrap();
    assert_eq!(p.rashi, Rashi::Mesha);
    assert_eq!(p.nakshatra, Nakshatra::Ashwini);
    assert_eq!(p.pada, 1);
    assert!(p.degree_in_rashi.abs() < 1e-12);
}

#[test]
fn ayanamsa_is_subtracted() {
    // 43 tropical - 24 ayanamsa = 19 sidereal, in Bharani
    let p = normalize(43.0, 24.0).unwrap();
    assert!((p.longitude - 19.0).abs() < 1e-9);
    assert_eq!(p.rashi, Rashi::Mesha);
    assert_eq!(p.nakshatra, Nakshatra::Bharani);
    assert_eq!(p.pada, 2);
}

#[test]
fn negative_sidereal_wraps_to_meena() {
    let p = normalize(10.0, 24.0).unwrap();
    assert!((p.longitude - 346.0).abs() < 1e-9);
    assert_eq!(p.rashi, Rashi::Meena);
    assert_eq!(p.nakshatra, Nakshatra::Revati);
}

#[test]
fn sweep_reconstructs_longitude() {
    let mut lon = 0.0;
    while lon < 360.0 {
        let p = normalize(lon, 0.0).unwrap();
        let back = p.rashi_index as f64 * 30.0 + p.degree_in_rashi;
        assert!((back - lon).abs() < 1e-9, "lon={lon}");
        assert!((1..=4).contains(&p.pada));
        lon += 0.37;
    }
}

#[test]
fn every_ten_degrees_starts_a_pada() {
    // Ten degrees is exactly three padas
    for k in 0u8..36 {
        let lon = k as f64 * 10.0;
        let p = normalize(lon, 0.0).unwrap();
        let q = k * 3;
        assert_eq!(p.nakshatra_index, q / 4, "lon {lon}");
        assert_eq!(p.pada, q % 4 + 1, "lon {lon}");
    }
    let swati = normalize(190.0, 0.0).unwrap();
    assert_eq!(swati.nakshatra, Nakshatra::Swati);
    assert_eq!(swati.pada, 2);
    let p = normalize(350.0, 0.0).unwrap();
    assert_eq!(p.nakshatra, Nakshatra::Revati);
    assert_eq!(p.pada, 2);
}

#[test]
fn huge_operands_still_wrap() {
    let p = normalize(1e308, -1e308).unwrap();
    assert!((0.0..360.0).contains(&p.longitude));
    assert!(normalize(f64::MAX, -f64::MAX).is_ok());
}

#[test]
fn nan_is_rejected() {
    assert!(normalize(f64::NAN, 24.0).is_err());
    assert!(normalize(100.0, f64::INFINITY).is_err());
}

// ---------------------------------------------------------------------------
// Houses
// ---------------------------------------------------------------------------

#[test]
fn whole_sign_house_examples() {
    // Dhanu graha, Tula lagna
    assert_eq!(assign_house(8, 6), 3);
    // Meena graha, Kanya lagna wraps
    assert_eq!(assign_house(11, 5), 7);
    // Same sign
    assert_eq!(assign_house(4, 4), 1);
    // Sign just before lagna
    assert_eq!(assign_house(3, 4), 12);
    // Makara graha, Tula lagna
    assert_eq!(assign_house(9, 6), 4);
}

// ---------------------------------------------------------------------------
// Dignity
// ---------------------------------------------------------------------------

#[test]
fn deep_exaltation_and_debilitation() {
    let all = snapshot(&[
        body(Graha::Surya, 10.0, 1.0, 0.0),
        body(Graha::Shani, 20.5, 0.1, 0.0),
    ]);
    let sun = classify_dignity(Graha::Surya, &normalize(10.0, 0.0).unwrap(), &all).unwrap();
    assert_eq!(sun.dignity, Dignity::Exalted);
    assert!(sun.deep);

    let sat = classify_dignity(Graha::Shani, &normalize(20.5, 0.0).unwrap(), &all).unwrap();
    assert_eq!(sat.dignity, Dignity::Debilitated);
    assert!(sat.deep);
}

#[test]
fn exaltation_sign_without_depth() {
    let all = snapshot(&[
        body(Graha::Surya, 200.0, 1.0, 0.0),
        body(Graha::Chandra, 40.0, 13.0, 0.0),
    ]);
    let moon = classify_dignity(Graha::Chandra, &normalize(40.0, 0.0).unwrap(), &all).unwrap();
    assert_eq!(moon.dignity, Dignity::Exalted);
    assert!(!moon.deep);
}

#[test]
fn moolatrikona_before_own_sign() {
    let all = snapshot(&[
        body(Graha::Surya, 200.0, 1.0, 0.0),
        body(Graha::Mangal, 5.0, 0.6, 0.0),
        body(Graha::Guru, 250.0, 0.1, 0.0),
    ]);
    let mars = classify_dignity(Graha::Mangal, &normalize(5.0, 0.0).unwrap(), &all).unwrap();
    assert_eq!(mars.dignity, Dignity::Moolatrikona);

    // Dhanu 10 is past Jupiter's moolatrikona span
    let jup = classify_dignity(Graha::Guru, &normalize(250.0, 0.0).unwrap(), &all).unwrap();
    assert_eq!(jup.dignity, Dignity::Own);
}

#[test]
fn natural_relationship_fallback() {
    let all = snapshot(&[
        body(Graha::Surya, 100.0, 1.0, 0.0),
        body(Graha::Shani, 130.0, 0.1, 0.0),
    ]);
    let sat = classify_dignity(Graha::Shani, &normalize(130.0, 0.0).unwrap(), &all).unwrap();
    // Saturn in Simha, ruled by its enemy the Sun
    assert_eq!(sat.dignity, Dignity::Enemy);
}

#[test]
fn nodes_have_no_dignity() {
    let all = snapshot(&[
        body(Graha::Surya, 100.0, 1.0, 0.0),
        body(Graha::Rahu, 60.0, -0.05, 0.0),
    ]);
    let rahu = classify_dignity(Graha::Rahu, &normalize(60.0, 0.0).unwrap(), &all).unwrap();
    assert_eq!(rahu.dignity, Dignity::NotApplicable);
    assert!(!rahu.is_combust);
    assert!(rahu.is_retrograde);
}

#[test]
fn missing_sun_is_reported() {
    let all = snapshot(&[body(Graha::Buddh, 5.0, 1.2, 0.0)]);
    let err = classify_dignity(Graha::Buddh, &normalize(5.0, 0.0).unwrap(), &all).unwrap_err();
    assert!(err.to_string().contains("Surya"));
}

// ---------------------------------------------------------------------------
// Combustion
// ---------------------------------------------------------------------------

#[test]
fn mercury_across_zero_is_combust() {
    assert!((angular_separation(5.0, 355.0) - 10.0).abs() < 1e-12);
    assert!(is_combust(Graha::Buddh, 5.0, 355.0, false));

    let all = snapshot(&[
        body(Graha::Surya, 355.0, 1.0, 0.0),
        body(Graha::Buddh, 5.0, 1.5, 0.0),
    ]);
    let merc = classify_dignity(Graha::Buddh, &normalize(5.0, 0.0).unwrap(), &all).unwrap();
    assert!(merc.is_combust);
}

#[test]
fn retrograde_orbs_are_tighter() {
    assert_eq!(combustion_orb(Graha::Buddh, false), Some(14.0));
    assert_eq!(combustion_orb(Graha::Buddh, true), Some(12.0));
    assert!(is_combust(Graha::Buddh, 13.0, 0.0, false));
    assert!(!is_combust(Graha::Buddh, 13.0, 0.0, true));
}

#[test]
fn exactly_at_orb_is_not_combust() {
    assert!(!is_combust(Graha::Guru, 11.0, 0.0, false));
    assert!(is_combust(Graha::Guru, 10.999, 0.0, false));
}

// ---------------------------------------------------------------------------
// Planetary war
// ---------------------------------------------------------------------------

#[test]
fn faster_graha_wins_war() {
    let all = snapshot(&[
        body(Graha::Surya, 250.0, 1.0, 0.0),
        body(Graha::Mangal, 100.0, 0.6, 1.0),
        body(Graha::Guru, 100.5, 0.1, -0.5),
    ]);
    let mars = classify_dignity(Graha::Mangal, &normalize(100.0, 0.0).unwrap(), &all).unwrap();
    let jup = classify_dignity(Graha::Guru, &normalize(100.5, 0.0).unwrap(), &all).unwrap();

    let mars_war = mars.war.unwrap();
    assert_eq!(mars_war.opponent, Graha::Guru);
    assert_eq!(mars_war.role, WarRole::Winner);
    assert!(!mars_war.ambiguous);
    assert!(jup.lost_war());
}

#[test]
fn luminaries_never_fight() {
    let all = snapshot(&[
        body(Graha::Surya, 100.0, 1.0, 0.0),
        body(Graha::Chandra, 100.3, 13.0, 0.0),
        body(Graha::Shukra, 100.6, 1.2, 0.0),
    ]);
    let moon = classify_dignity(Graha::Chandra, &normalize(100.3, 0.0).unwrap(), &all).unwrap();
    assert!(!moon.is_in_war());
}

#[test]
fn war_orb_is_exclusive() {
    let all = snapshot(&[
        body(Graha::Surya, 250.0, 1.0, 0.0),
        body(Graha::Mangal, 100.0, 0.6, 0.0),
        body(Graha::Shani, 101.0, 0.1, 0.0),
    ]);
    let mars = classify_dignity(Graha::Mangal, &normalize(100.0, 0.0).unwrap(), &all).unwrap();
    assert!(mars.war.is_none());
}
