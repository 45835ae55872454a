//! Deployment rule profile.

use serde::{Deserialize, Serialize};

use crate::calculator::RuleVariant;
use crate::validation::DateWindow;

/// Selects the rule table and the validation limits for a deployment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RuleProfile {
    pub variant: RuleVariant,
    /// Smallest accepted age in years
    pub min_age: u32,
    /// Smallest accepted weight in kg
    #[serde(default = "default_min_weight_kg")]
    pub min_weight_kg: f64,
    pub date_window: DateWindow,
}

fn default_min_weight_kg() -> f64 {
    1.0
}

impl RuleProfile {
    /// Additive tiers, age from 1, onset dates in 2024.
    pub fn version_one() -> Self {
        Self {
            variant: RuleVariant::TieredAdditive,
            min_age: 1,
            min_weight_kg: default_min_weight_kg(),
            date_window: DateWindow::CalendarYear { year: 2024 },
        }
    }

    /// Flat-rate tiers, age from 0, onset dates within the last 30 days.
    pub fn version_two() -> Self {
        Self {
            variant: RuleVariant::TieredFlatRate,
            min_age: 0,
            min_weight_kg: default_min_weight_kg(),
            date_window: DateWindow::TrailingDays { days: 30 },
        }
    }

    pub fn with_variant(mut self, variant: RuleVariant) -> Self {
        self.variant = variant;
        self
    }
}

impl Default for RuleProfile {
    fn default() -> Self {
        Self::version_two()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_version_two() {
        assert_eq!(RuleProfile::default(), RuleProfile::version_two());
    }

    #[test]
    fn test_deserialize_partial() {
        let json = r#"{
            "variant": "tiered_additive",
            "minAge": 1,
            "dateWindow": {"policy": "calendar_year", "year": 2024}
        }"#;
        let profile: RuleProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile, RuleProfile::version_one());
    }
}
