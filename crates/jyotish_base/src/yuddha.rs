//! Graha yuddha (planetary war).
//!
//! Two taragrahas (Mars, Mercury, Jupiter, Venus, Saturn) are at war when
//! their circular separation is below 1 degree. The winner is decided by a
//! single fixed order:
//!
//! 1. higher absolute daily speed,
//! 2. then higher ecliptic latitude,
//! 3. then lower graha index.
//!
//! When the speeds tie the war is flagged `ambiguous`, since classical
//! sources disagree on the fallback.

use serde::{Deserialize, Serialize};

use crate::graha::{Graha, TARA_GRAHAS};
use crate::position::{GrahaPosition, GrahaPositions};
use crate::util::angular_separation;

/// Maximum separation (exclusive) for a war, in degrees.
pub const WAR_ORB: f64 = 1.0;

/// Speeds closer than this (deg/day) count as tied.
pub const SPEED_TIE_EPS: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WarRole {
    Winner,
    Loser,
}

/// War state of one graha against its closest opponent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WarState {
    pub opponent: Graha,
    pub role: WarRole,
    /// Speeds tied and latitude or index decided the outcome.
    pub ambiguous: bool,
    /// Circular separation from the opponent, in degrees.
    pub separation: f64,
}

/// Winner of a war between `a` and `b`, and whether the speed tie-break
/// was inconclusive.
pub fn war_winner(a: &GrahaPosition, b: &GrahaPosition) -> (Graha, bool) {
    let speed_a = a.daily_speed.abs();
    let speed_b = b.daily_speed.abs();
    if (speed_a - speed_b).abs() > SPEED_TIE_EPS {
        let winner = if speed_a > speed_b { a.graha } else { b.graha };
        return (winner, false);
    }
    let winner = if a.latitude > b.latitude {
        a.graha
    } else if b.latitude > a.latitude {
        b.graha
    } else if a.graha.index() < b.graha.index() {
        a.graha
    } else {
        b.graha
    };
    (winner, true)
}

/// War state of `graha`, or `None` when it is not at war (or cannot be).
///
/// With several opponents inside the orb, the closest one is reported;
/// equal distances go to the lower graha index.
pub fn war_state(graha: Graha, positions: &GrahaPositions) -> Option<WarState> {
    if !graha.is_tara() {
        return None;
    }
    let me = positions.get(graha)?;

    let mut closest: Option<(&GrahaPosition, f64)> = None;
    for other in TARA_GRAHAS {
        if other == graha {
            continue;
        }
        let Some(op) = positions.get(other) else {
            continue;
        };
        let sep = angular_separation(me.longitude(), op.longitude());
        if sep >= WAR_ORB {
            continue;
        }
        match closest {
            Some((_, best)) if best <= sep => {}
            _ => closest = Some((op, sep)),
        }
    }

    let (opponent, separation) = closest?;
    let (winner, ambiguous) = war_winner(me, opponent);
    let role = if winner == graha {
        WarRole::Winner
    } else {
        WarRole::Loser
    };
    tracing::debug!(
        graha = graha.name(),
        opponent = opponent.graha.name(),
        ?role,
        ambiguous,
        "planetary war"
    );
    Some(WarState {
        opponent: opponent.graha,
        role,
        ambiguous,
        separation,
    })
}
