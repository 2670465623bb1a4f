//! Dignity classifier.
//!
//! Rule precedence, first match wins:
//!
//! 1. deep exaltation/debilitation (within [`DEEP_ORB`] of the exact degree),
//! 2. exaltation/debilitation sign,
//! 3. moolatrikona degree range,
//! 4. own sign,
//! 5. natural relation with the sign lord (friend, neutral, enemy).
//!
//! Moolatrikona ranges all sit inside an own or exaltation sign, so the
//! range test has to run before the own-sign test to be reachable.
//! Rahu and Ketu are outside the classical tables and classify as
//! [`Dignity::NotApplicable`]; their motion and war state are still reported.

use serde::{Deserialize, Serialize};

use crate::combustion::is_combust;
use crate::error::JyotishError;
use crate::graha::{Graha, rashi_lord_by_index};
use crate::position::{GrahaPositions, SiderealPosition};
use crate::relationships::{
    NaisargikaMaitri, PanchadhaMaitri, debilitation_degree, debilitation_rashi,
    exaltation_degree, exaltation_rashi, moolatrikona_range, naisargika_maitri, own_signs,
    panchadha_maitri, tatkalika_maitri,
};
use crate::util::{angular_separation, ensure_finite};
use crate::yuddha::{WarRole, WarState, war_state};

/// Orb around the exact exaltation/debilitation degree that counts as deep.
pub const DEEP_ORB: f64 = 1.0;

/// Sign dignity of a graha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dignity {
    Exalted,
    Debilitated,
    Own,
    Moolatrikona,
    Friend,
    Neutral,
    Enemy,
    NotApplicable,
}

/// Full classification of one graha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DignityResult {
    pub graha: Graha,
    pub dignity: Dignity,
    /// Within [`DEEP_ORB`] of the exact exaltation or debilitation degree.
    pub deep: bool,
    pub is_retrograde: bool,
    pub is_combust: bool,
    pub war: Option<WarState>,
}

impl DignityResult {
    pub fn is_in_war(&self) -> bool {
        self.war.is_some()
    }

    pub fn lost_war(&self) -> bool {
        matches!(self.war, Some(w) if w.role == WarRole::Loser)
    }
}

/// Sign dignity and deep flag from the sidereal position alone.
pub fn sign_dignity(graha: Graha, position: &SiderealPosition) -> (Dignity, bool) {
    let (Some(exalt), Some(debil)) = (exaltation_degree(graha), debilitation_degree(graha)) else {
        return (Dignity::NotApplicable, false);
    };
    let lon = position.longitude;
    let rashi = position.rashi_index;

    if angular_separation(lon, exalt) <= DEEP_ORB {
        return (Dignity::Exalted, true);
    }
    if angular_separation(lon, debil) <= DEEP_ORB {
        return (Dignity::Debilitated, true);
    }
    if exaltation_rashi(graha) == Some(rashi) {
        return (Dignity::Exalted, false);
    }
    if debilitation_rashi(graha) == Some(rashi) {
        return (Dignity::Debilitated, false);
    }
    if let Some((mt_rashi, start, end)) = moolatrikona_range(graha) {
        if mt_rashi == rashi && position.degree_in_rashi >= start && position.degree_in_rashi < end
        {
            return (Dignity::Moolatrikona, false);
        }
    }
    if own_signs(graha).contains(&rashi) {
        return (Dignity::Own, false);
    }
    let dignity = match naisargika_maitri(graha, rashi_lord_by_index(rashi)) {
        NaisargikaMaitri::Friend => Dignity::Friend,
        NaisargikaMaitri::Neutral => Dignity::Neutral,
        NaisargikaMaitri::Enemy => Dignity::Enemy,
    };
    (dignity, false)
}

/// Longitudes closer than this are the same placement.
const SAME_PLACEMENT_ORB: f64 = 1e-9;

/// Classify `graha` at `position` against the chart snapshot `all`.
///
/// The snapshot entry for `graha` is the single source of the body's
/// state: `position` must be its sidereal placement, and a `position` that
/// disagrees with it fails with [`JyotishError::InvalidInput`]. Combustion
/// additionally needs the Sun. A missing required entry is reported as
/// [`JyotishError::MissingPosition`] so the caller can record a per-planet
/// failure.
pub fn classify_dignity(
    graha: Graha,
    position: &SiderealPosition,
    all: &GrahaPositions,
) -> Result<DignityResult, JyotishError> {
    ensure_finite(position.longitude, "sidereal longitude is not finite")?;
    let own = all.require(graha)?;
    if angular_separation(own.longitude(), position.longitude) > SAME_PLACEMENT_ORB {
        return Err(JyotishError::InvalidInput(
            "position differs from the snapshot entry",
        ));
    }
    let is_retrograde = own.is_retrograde();

    let is_combust = if graha == Graha::Surya || graha.is_node() {
        false
    } else {
        let sun = all.require(Graha::Surya)?;
        is_combust(graha, own.longitude(), sun.longitude(), is_retrograde)
    };

    let (dignity, deep) = sign_dignity(graha, &own.sidereal);
    Ok(DignityResult {
        graha,
        dignity,
        deep,
        is_retrograde,
        is_combust,
        war: war_state(graha, all),
    })
}

// ---------------------------------------------------------------------------
// Compound dignity (divisional charts)
// ---------------------------------------------------------------------------

/// Nine-step dignity combining natural and temporal friendship, used when
/// scoring divisional charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompoundDignity {
    Exalted,
    Moolatrikona,
    OwnSign,
    AdhiMitra,
    Mitra,
    Sama,
    Shatru,
    AdhiShatru,
    Debilitated,
}

/// Compound dignity of `graha` placed in `rashi` of some varga.
///
/// `degree_in_rashi` is only meaningful in the rasi chart (D1); pass `None`
/// for other vargas so the moolatrikona degree range is skipped.
/// `varga_rashis` holds the seven grahas' rashis in the same varga, for the
/// temporal relation with the sign lord. `None` for nodes.
pub fn compound_dignity(
    graha: Graha,
    rashi: u8,
    degree_in_rashi: Option<f64>,
    varga_rashis: &[u8; 7],
) -> Option<CompoundDignity> {
    let gi = graha.sapta_index()?;
    let rashi = rashi % 12;

    if exaltation_rashi(graha) == Some(rashi) {
        return Some(CompoundDignity::Exalted);
    }
    if debilitation_rashi(graha) == Some(rashi) {
        return Some(CompoundDignity::Debilitated);
    }
    if let (Some((mt_rashi, start, end)), Some(deg)) = (moolatrikona_range(graha), degree_in_rashi)
    {
        if mt_rashi == rashi && deg >= start && deg < end {
            return Some(CompoundDignity::Moolatrikona);
        }
    }
    if own_signs(graha).contains(&rashi) {
        return Some(CompoundDignity::OwnSign);
    }

    let lord = rashi_lord_by_index(rashi);
    let li = lord.sapta_index()?;
    let relation = panchadha_maitri(
        naisargika_maitri(graha, lord),
        tatkalika_maitri(varga_rashis[gi], varga_rashis[li]),
    );
    Some(match relation {
        PanchadhaMaitri::AdhiMitra => CompoundDignity::AdhiMitra,
        PanchadhaMaitri::Mitra => CompoundDignity::Mitra,
        PanchadhaMaitri::Sama => CompoundDignity::Sama,
        PanchadhaMaitri::Shatru => CompoundDignity::Shatru,
        PanchadhaMaitri::AdhiShatru => CompoundDignity::AdhiShatru,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::{CelestialBody, GrahaPosition};

    fn sid(lon: f64) -> SiderealPosition {
        SiderealPosition::from_longitude(lon).unwrap()
    }

    fn snapshot(list: &[(Graha, f64, f64)]) -> GrahaPositions {
        let mut s = GrahaPositions::new();
        for &(graha, lon, speed) in list {
            let body = CelestialBody {
                graha,
                tropical_longitude: lon,
                daily_speed: speed,
                latitude: 0.0,
            };
            s.insert(GrahaPosition::from_body(&body, 0.0).unwrap());
        }
        s
    }

    #[test]
    fn deep_exaltation() {
        assert_eq!(sign_dignity(Graha::Surya, &sid(10.5)), (Dignity::Exalted, true));
        assert_eq!(sign_dignity(Graha::Surya, &sid(25.0)), (Dignity::Exalted, false));
    }

    #[test]
    fn deep_debilitation_across_sign() {
        // Saturn debilitated at 20 Aries.
        assert_eq!(sign_dignity(Graha::Shani, &sid(19.2)), (Dignity::Debilitated, true));
        assert_eq!(sign_dignity(Graha::Shani, &sid(2.0)), (Dignity::Debilitated, false));
    }

    #[test]
    fn venus_deep_exaltation_wraps_zero() {
        // 27 Pisces = 357; 0.5 Aries is 3.5 deg away, not deep.
        assert_eq!(sign_dignity(Graha::Shukra, &sid(357.8)), (Dignity::Exalted, true));
        assert_eq!(sign_dignity(Graha::Shukra, &sid(0.5)).0, Dignity::Neutral);
    }

    #[test]
    fn moolatrikona_before_own_sign() {
        assert_eq!(sign_dignity(Graha::Surya, &sid(125.0)).0, Dignity::Moolatrikona);
        assert_eq!(sign_dignity(Graha::Surya, &sid(145.0)).0, Dignity::Own);
        assert_eq!(sign_dignity(Graha::Mangal, &sid(5.0)).0, Dignity::Moolatrikona);
        assert_eq!(sign_dignity(Graha::Mangal, &sid(20.0)).0, Dignity::Own);
    }

    #[test]
    fn moon_exaltation_sign_beats_moolatrikona() {
        // Moon MT is 4-20 Taurus, inside its exaltation sign.
        assert_eq!(sign_dignity(Graha::Chandra, &sid(40.0)).0, Dignity::Exalted);
    }

    #[test]
    fn friend_enemy_by_sign_lord() {
        // Sun in Sagittarius (Jupiter): friend. Sun in Capricorn (Saturn): enemy.
        assert_eq!(sign_dignity(Graha::Surya, &sid(250.0)).0, Dignity::Friend);
        assert_eq!(sign_dignity(Graha::Surya, &sid(280.0)).0, Dignity::Enemy);
        // Mercury in Cancer (Moon): enemy, but Moon in Gemini (Mercury): friend.
        assert_eq!(sign_dignity(Graha::Buddh, &sid(100.0)).0, Dignity::Enemy);
        assert_eq!(sign_dignity(Graha::Chandra, &sid(70.0)).0, Dignity::Friend);
    }

    #[test]
    fn nodes_not_applicable() {
        assert_eq!(sign_dignity(Graha::Rahu, &sid(50.0)), (Dignity::NotApplicable, false));
    }

    #[test]
    fn classify_combust_wraparound() {
        let all = snapshot(&[(Graha::Surya, 355.0, 1.0), (Graha::Buddh, 5.0, 1.2)]);
        let r = classify_dignity(Graha::Buddh, &sid(5.0), &all).unwrap();
        assert!(r.is_combust);
        assert!(!r.is_retrograde);
    }

    #[test]
    fn classify_node_reports_motion() {
        let all = snapshot(&[(Graha::Surya, 100.0, 1.0), (Graha::Rahu, 101.0, -0.05)]);
        let r = classify_dignity(Graha::Rahu, &sid(101.0), &all).unwrap();
        assert_eq!(r.dignity, Dignity::NotApplicable);
        assert!(r.is_retrograde);
        assert!(!r.is_combust);
    }

    #[test]
    fn classify_missing_sun_is_error() {
        let all = snapshot(&[(Graha::Guru, 100.0, 0.1)]);
        assert_eq!(
            classify_dignity(Graha::Guru, &sid(100.0), &all),
            Err(JyotishError::MissingPosition(Graha::Surya))
        );
        // The Sun itself does not need another body.
        let sun_only = snapshot(&[(Graha::Surya, 10.0, 1.0)]);
        assert!(classify_dignity(Graha::Surya, &sid(10.0), &sun_only).is_ok());
    }

    #[test]
    fn classify_rejects_position_off_snapshot() {
        let all = snapshot(&[(Graha::Surya, 355.0, 1.0), (Graha::Buddh, 5.0, 1.2)]);
        // 40 degrees from the Sun would not be combust; the mix must not happen
        assert_eq!(
            classify_dignity(Graha::Buddh, &sid(45.0), &all),
            Err(JyotishError::InvalidInput(
                "position differs from the snapshot entry"
            ))
        );
        // Same placement written as a different turn is accepted
        assert!(classify_dignity(Graha::Buddh, &sid(365.0), &all).is_ok());
    }

    #[test]
    fn classify_needs_own_snapshot_entry() {
        let all = snapshot(&[(Graha::Surya, 355.0, 1.0)]);
        assert_eq!(
            classify_dignity(Graha::Shani, &sid(200.0), &all),
            Err(JyotishError::MissingPosition(Graha::Shani))
        );
    }

    #[test]
    fn classify_war_loser() {
        let all = snapshot(&[
            (Graha::Surya, 200.0, 1.0),
            (Graha::Mangal, 100.0, 0.5),
            (Graha::Shukra, 100.4, 1.2),
        ]);
        let r = classify_dignity(Graha::Mangal, &sid(100.0), &all).unwrap();
        assert!(r.lost_war());
        let v = classify_dignity(Graha::Shukra, &sid(100.4), &all).unwrap();
        assert!(v.is_in_war() && !v.lost_war());
    }

    #[test]
    fn compound_uses_temporal_relation() {
        // Sun in Sagittarius, Jupiter two signs on (Aquarius): natural friend
        // and temporal friend.
        let mut rashis = [0u8; 7];
        rashis[0] = 8;
        rashis[4] = 10;
        assert_eq!(
            compound_dignity(Graha::Surya, 8, None, &rashis),
            Some(CompoundDignity::AdhiMitra)
        );
        // Jupiter in the same sign as the Sun: temporal enemy.
        rashis[4] = 8;
        assert_eq!(
            compound_dignity(Graha::Surya, 8, None, &rashis),
            Some(CompoundDignity::Sama)
        );
        assert_eq!(compound_dignity(Graha::Ketu, 8, None, &rashis), None);
    }

    #[test]
    fn compound_moolatrikona_only_with_degree() {
        let rashis = [4u8; 7];
        assert_eq!(
            compound_dignity(Graha::Surya, 4, Some(10.0), &rashis),
            Some(CompoundDignity::Moolatrikona)
        );
        assert_eq!(
            compound_dignity(Graha::Surya, 4, None, &rashis),
            Some(CompoundDignity::OwnSign)
        );
    }
}
