//! Weight-based daily fluid volume rule.
//!
//! Each [`RuleVariant`] is a table of four weight tiers. A tier computes
//! `base_ml + (weight - offset_kg) * ml_per_kg`, which expresses both the
//! additive form (`1000ml + 50ml/kg above 10kg`) and the flat-rate form
//! (`100ml/kg`) with the same evaluation path.

use serde::{Deserialize, Serialize};

/// Guidance on how the daily volume should be split.
pub const ELECTROLYTE_GUIDANCE: &str = "1/3 oral rehydration solution and 2/3 other fluids.";

/// One weight band of a rule table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tier {
    /// Inclusive upper bound in kg; `None` for the open-ended last tier
    pub upper_kg: Option<f64>,
    pub base_ml: f64,
    pub offset_kg: f64,
    pub ml_per_kg: f64,
    pub label: &'static str,
}

impl Tier {
    const fn flat(upper_kg: Option<f64>, ml_per_kg: f64, label: &'static str) -> Self {
        Self {
            upper_kg,
            base_ml: 0.0,
            offset_kg: 0.0,
            ml_per_kg,
            label,
        }
    }

    const fn additive(
        upper_kg: Option<f64>,
        base_ml: f64,
        offset_kg: f64,
        ml_per_kg: f64,
        label: &'static str,
    ) -> Self {
        Self {
            upper_kg,
            base_ml,
            offset_kg,
            ml_per_kg,
            label,
        }
    }

    /// Whether `weight_kg` falls in this tier. Upper bounds are inclusive, so a
    /// boundary weight belongs to the lower tier.
    pub fn contains(&self, weight_kg: f64) -> bool {
        match self.upper_kg {
            Some(upper) => weight_kg <= upper,
            None => true,
        }
    }

    pub fn volume_ml(&self, weight_kg: f64) -> f64 {
        self.base_ml + (weight_kg - self.offset_kg) * self.ml_per_kg
    }
}

const TIERED_ADDITIVE: [Tier; 4] = [
    Tier::flat(Some(10.0), 100.0, "100ml/kg/day"),
    Tier::additive(
        Some(20.0),
        1000.0,
        10.0,
        50.0,
        "1000ml + 50ml/kg/day for each kg above 10kg",
    ),
    Tier::additive(
        Some(30.0),
        1500.0,
        20.0,
        20.0,
        "1500ml + 20ml/kg/day for each kg above 20kg",
    ),
    Tier::flat(None, 60.0, "60ml/kg/day"),
];

const TIERED_FLAT_RATE: [Tier; 4] = [
    Tier::flat(Some(10.0), 130.0, "130ml/kg/day"),
    Tier::flat(Some(20.0), 100.0, "100ml/kg/day"),
    Tier::flat(Some(30.0), 80.0, "80ml/kg/day"),
    Tier::flat(None, 60.0, "60ml/kg/day"),
];

/// Rule table selected per deployment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RuleVariant {
    /// 100ml/kg up to 10kg, then additive increments (variant A)
    TieredAdditive,
    /// Flat per-kg rates that decrease with weight (variant B)
    TieredFlatRate,
}

impl RuleVariant {
    pub fn tiers(&self) -> &'static [Tier] {
        match self {
            RuleVariant::TieredAdditive => &TIERED_ADDITIVE,
            RuleVariant::TieredFlatRate => &TIERED_FLAT_RATE,
        }
    }

    pub fn electrolyte_guidance(&self) -> &'static str {
        match self {
            RuleVariant::TieredAdditive | RuleVariant::TieredFlatRate => ELECTROLYTE_GUIDANCE,
        }
    }

    /// Compute the daily volume for a weight in kg.
    pub fn calculate(&self, weight_kg: f64) -> FluidCalculation {
        let tiers = self.tiers();
        let tier = tiers
            .iter()
            .find(|tier| tier.contains(weight_kg))
            .unwrap_or(&tiers[tiers.len() - 1]);

        FluidCalculation {
            variant: *self,
            weight_kg,
            total_volume_ml: tier.volume_ml(weight_kg),
            formula_label: tier.label,
            electrolyte_guidance: self.electrolyte_guidance(),
        }
    }
}

/// Result of applying a rule variant to a weight.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FluidCalculation {
    pub variant: RuleVariant,
    pub weight_kg: f64,
    /// Full-precision volume in ml
    pub total_volume_ml: f64,
    pub formula_label: &'static str,
    pub electrolyte_guidance: &'static str,
}

impl FluidCalculation {
    /// Volume rounded to whole millilitres.
    pub fn rounded_volume_ml(&self) -> f64 {
        self.total_volume_ml.round()
    }

    /// Volume for display, e.g. `1100ml`.
    pub fn display_volume(&self) -> String {
        format!("{:.0}ml", self.rounded_volume_ml())
    }
}
