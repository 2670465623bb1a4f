//! Lazy, index-addressable dasha tree.
//!
//! Nothing is materialized at build time. Mahadasha `n` is computed
//! directly from the cycle arithmetic, and sub-periods are generated on
//! demand from their parent. All boundaries are whole milliseconds:
//!
//! ```text
//! child_k.start = parent.start + parent.duration * years(first k lords) / cycle
//! ```
//!
//! with floor division in i128, so the children of any period tile it
//! exactly.

use serde::{Deserialize, Serialize};

use crate::error::JyotishError;
use crate::graha::Graha;
use crate::time::Instant;

use super::balance::BirthBalance;
use super::system::DashaSystem;
use super::types::{DashaLevel, DashaPeriod, DashaSnapshot, MS_PER_YEAR, PeriodPath};

/// Dasha tree anchored at a birth instant, bounded by a horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashaTree {
    birth: Instant,
    horizon: Instant,
    balance: BirthBalance,
    /// Virtual start of mahadasha 0: `birth - consumed`.
    origin_ms: i64,
}

impl DashaTree {
    /// Build the tree; only the birth balance is computed eagerly.
    pub fn new(
        balance: BirthBalance,
        birth: Instant,
        horizon_years: f64,
    ) -> Result<Self, JyotishError> {
        if !horizon_years.is_finite() || horizon_years <= 0.0 {
            return Err(JyotishError::InvalidInput(
                "dasha horizon must be a finite positive number of years",
            ));
        }
        let horizon_ms = (horizon_years * MS_PER_YEAR as f64).round();
        if horizon_ms < 1.0 || horizon_ms >= i64::MAX as f64 {
            return Err(JyotishError::InvalidInput("dasha horizon out of range"));
        }
        let horizon = birth
            .checked_add_millis(horizon_ms as i64)
            .ok_or(JyotishError::InvalidInput("dasha horizon out of range"))?;
        let origin_ms = birth
            .unix_millis()
            .checked_sub(balance.consumed_ms)
            .ok_or(JyotishError::InvalidInput("birth instant out of range"))?;

        Ok(Self {
            birth,
            horizon,
            balance,
            origin_ms,
        })
    }

    pub fn birth(&self) -> Instant {
        self.birth
    }

    /// Exclusive upper bound of queryable instants.
    pub fn horizon(&self) -> Instant {
        self.horizon
    }

    pub fn balance(&self) -> &BirthBalance {
        &self.balance
    }

    pub fn system(&self) -> DashaSystem {
        self.balance.system
    }

    fn first_index(&self) -> Option<usize> {
        self.system().sequence_index(self.balance.lord)
    }

    /// Mahadasha `n` (0 = the birth mahadasha), in O(1).
    ///
    /// `None` when it starts at or beyond the horizon. Mahadasha 0 starts
    /// before birth by the consumed balance.
    pub fn mahadasha(&self, n: u64) -> Option<DashaPeriod> {
        let system = self.system();
        let len = system.len() as u64;
        let first = self.first_index()?;
        let cycles = (n / len) as i128;
        let r = (n % len) as usize;
        let offset_years =
            cycles * system.cycle_years() as i128 + system.rotated_years(first, r) as i128;

        let start = self.origin_ms as i128 + offset_years * MS_PER_YEAR as i128;
        let seq = (first + r) % system.len();
        let end = start + system.years_at(seq) as i128 * MS_PER_YEAR as i128;
        if start >= self.horizon.unix_millis() as i128 {
            return None;
        }
        Some(DashaPeriod {
            lord: system.lords()[seq],
            level: DashaLevel::Mahadasha,
            start: Instant::from_unix_millis(i64::try_from(start).ok()?),
            end: Instant::from_unix_millis(i64::try_from(end).ok()?),
            path: PeriodPath {
                mahadasha: n,
                antardasha: None,
                pratyantardasha: None,
            },
        })
    }

    /// Mahadashas in order, up to the horizon.
    pub fn mahadashas(&self) -> impl Iterator<Item = DashaPeriod> + '_ {
        (0u64..).map_while(move |n| self.mahadasha(n))
    }

    /// Sub-period `k` of `parent`, counted from the parent's own lord.
    /// `None` below the pratyantardasha level or past the last lord.
    pub fn child(&self, parent: &DashaPeriod, k: u8) -> Option<DashaPeriod> {
        let level = parent.level.child_level()?;
        let system = self.system();
        let k = k as usize;
        if k >= system.len() {
            return None;
        }
        let first = system.sequence_index(parent.lord)?;
        let start_ms = parent.start.unix_millis() as i128;
        let span = parent.duration_ms() as i128;
        let cycle = system.cycle_years() as i128;
        let boundary =
            |count: usize| start_ms + span * system.rotated_years(first, count) as i128 / cycle;
        let start = i64::try_from(boundary(k)).ok()?;
        let end = i64::try_from(boundary(k + 1)).ok()?;

        let mut path = parent.path;
        match level {
            DashaLevel::Antardasha => path.antardasha = Some(k as u8),
            DashaLevel::Pratyantardasha => path.pratyantardasha = Some(k as u8),
            DashaLevel::Mahadasha => return None,
        }
        Some(DashaPeriod {
            lord: system.lords()[(first + k) % system.len()],
            level,
            start: Instant::from_unix_millis(start),
            end: Instant::from_unix_millis(end),
            path,
        })
    }

    /// All sub-periods of `parent`, starting with its own lord.
    /// Empty for a pratyantardasha.
    pub fn children(&self, parent: &DashaPeriod) -> Vec<DashaPeriod> {
        self.sub_indices()
            .filter_map(|k| self.child(parent, k))
            .collect()
    }

    fn sub_indices(&self) -> std::ops::Range<u8> {
        0..self.system().len() as u8
    }

    /// Parent of `period`, recomputed from its path.
    pub fn parent(&self, period: &DashaPeriod) -> Option<DashaPeriod> {
        match period.level {
            DashaLevel::Mahadasha => None,
            DashaLevel::Antardasha => self.mahadasha(period.path.mahadasha),
            DashaLevel::Pratyantardasha => {
                let md = self.mahadasha(period.path.mahadasha)?;
                self.child(&md, period.path.antardasha?)
            }
        }
    }

    /// Active mahadasha, antardasha and pratyantardasha at `t`.
    ///
    /// Fails with [`JyotishError::OutOfRange`] when `t` is before birth or
    /// at/after the horizon.
    pub fn query(&self, t: Instant) -> Result<DashaSnapshot, JyotishError> {
        let out_of_range = JyotishError::OutOfRange {
            query_ms: t.unix_millis(),
            start_ms: self.birth.unix_millis(),
            end_ms: self.horizon.unix_millis(),
        };
        if t < self.birth || t >= self.horizon {
            return Err(out_of_range);
        }

        let system = self.system();
        let first = self.first_index().ok_or_else(|| out_of_range.clone())?;
        let offset = t.unix_millis() as i128 - self.origin_ms as i128;
        let cycles = offset / system.cycle_ms() as i128;
        let mut rem = offset % system.cycle_ms() as i128;
        let mut r = 0usize;
        while r + 1 < system.len() {
            let len = system.years_at(first + r) as i128 * MS_PER_YEAR as i128;
            if rem < len {
                break;
            }
            rem -= len;
            r += 1;
        }
        let n = u64::try_from(cycles * system.len() as i128 + r as i128)
            .map_err(|_| out_of_range.clone())?;

        let md = self.mahadasha(n).ok_or_else(|| out_of_range.clone())?;
        let ad = self.active_child(&md, t).ok_or_else(|| out_of_range.clone())?;
        let pd = self.active_child(&ad, t).ok_or(out_of_range)?;

        Ok(DashaSnapshot {
            query: t,
            mahadasha: md,
            antardasha: ad,
            pratyantardasha: pd,
        })
    }

    fn active_child(&self, parent: &DashaPeriod, t: Instant) -> Option<DashaPeriod> {
        self.sub_indices()
            .filter_map(|k| self.child(parent, k))
            .find(|c| c.contains(t))
    }

    /// Lord of the birth mahadasha.
    pub fn birth_lord(&self) -> Graha {
        self.balance.lord
    }
}
