//! Usage record models.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::patient::Gender;
use crate::calculator::{FluidCalculation, RuleVariant};

/// One stored calculation request.
///
/// `id` and `created_at` are assigned by the store on insert and never change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UsageRecord {
    /// Surrogate key, never reused
    pub id: i64,
    pub gender: Gender,
    /// Age in years
    pub age: u32,
    /// Weight in kg
    pub weight_kg: f64,
    /// Symptom onset date
    pub symptom_onset: NaiveDate,
    /// Insert timestamp
    pub created_at: DateTime<Utc>,
}

impl UsageRecord {
    /// Recompute the fluid volume from the stored weight.
    pub fn calculate(&self, variant: RuleVariant) -> FluidCalculation {
        variant.calculate(self.weight_kg)
    }

    /// Projection served by the listing endpoint.
    pub fn summary(&self) -> RecordSummary {
        RecordSummary {
            id: self.id,
            gender: self.gender,
            age: self.age,
            weight: self.weight_kg,
            date: self.symptom_onset,
            created_at: self.created_at,
        }
    }

    /// Record plus its calculation, for rendering.
    pub fn view(self, variant: RuleVariant) -> RecordView {
        let calculation = self.calculate(variant);
        RecordView {
            record: self,
            calculation,
        }
    }
}

impl fmt::Display for UsageRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UsageRecord(id={}, gender={}, age={}, weight={}, date={}, created_at={})",
            self.id,
            self.gender,
            self.age,
            self.weight_kg,
            self.symptom_onset,
            self.created_at.to_rfc3339()
        )
    }
}

/// JSON listing element.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordSummary {
    pub id: i64,
    pub gender: Gender,
    pub age: u32,
    pub weight: f64,
    /// `YYYY-MM-DD`
    pub date: NaiveDate,
    /// RFC 3339 timestamp
    pub created_at: DateTime<Utc>,
}

/// A record with its calculation attached.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecordView {
    pub record: UsageRecord,
    pub calculation: FluidCalculation,
}
