//! Ishta and Kashta Phala: benefic and malefic potential derived from
//! Uchcha and Chesta Bala.

use serde::{Deserialize, Serialize};

use crate::graha::Graha;
use crate::shadbala::{ShadbalaResult, ShadbalaTable};

/// Effect category from `ishta% - kashta%`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhalaCategory {
    HighlyBenefic,
    ModeratelyBenefic,
    SlightlyBenefic,
    Neutral,
    SlightlyMalefic,
    ModeratelyMalefic,
    HighlyMalefic,
}

impl PhalaCategory {
    pub fn from_difference(diff_percent: f64) -> Self {
        match diff_percent {
            d if d > 40.0 => Self::HighlyBenefic,
            d if d > 20.0 => Self::ModeratelyBenefic,
            d if d > 5.0 => Self::SlightlyBenefic,
            d if d < -40.0 => Self::HighlyMalefic,
            d if d < -20.0 => Self::ModeratelyMalefic,
            d if d < -5.0 => Self::SlightlyMalefic,
            _ => Self::Neutral,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhalaResult {
    pub graha: Graha,
    /// Virupa, 0-60.
    pub ishta: f64,
    /// Virupa, 0-60.
    pub kashta: f64,
    pub ishta_percent: f64,
    pub kashta_percent: f64,
    pub category: PhalaCategory,
}

/// `ishta = sqrt(uchcha * chesta)`, `kashta = sqrt((60 - uchcha)(60 - chesta))`.
pub fn ishta_kashta(uchcha: f64, chesta: f64) -> (f64, f64) {
    let u = uchcha.clamp(0.0, 60.0);
    let c = chesta.clamp(0.0, 60.0);
    ((u * c).sqrt(), ((60.0 - u) * (60.0 - c)).sqrt())
}

impl PhalaResult {
    pub fn from_shadbala(result: &ShadbalaResult) -> Self {
        let (ishta, kashta) = ishta_kashta(result.sthana.uchcha, result.chesta);
        let ishta_percent = ishta / 60.0 * 100.0;
        let kashta_percent = kashta / 60.0 * 100.0;
        Self {
            graha: result.graha,
            ishta,
            kashta,
            ishta_percent,
            kashta_percent,
            category: PhalaCategory::from_difference(ishta_percent - kashta_percent),
        }
    }
}

/// Phala for the seven classical grahas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhalaTable {
    entries: [PhalaResult; 7],
}

impl PhalaTable {
    /// Entry for `graha`; `None` for Rahu and Ketu.
    pub fn get(&self, graha: Graha) -> Option<&PhalaResult> {
        graha.sapta_index().map(|i| &self.entries[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &PhalaResult> {
        self.entries.iter()
    }
}

pub fn compute_phala(shadbala: &ShadbalaTable) -> PhalaTable {
    let rows = shadbala.entries();
    PhalaTable {
        entries: std::array::from_fn(|i| PhalaResult::from_shadbala(&rows[i])),
    }
}
