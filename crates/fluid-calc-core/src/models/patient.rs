//! Patient input models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Patient gender as collected by the form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Stored and wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    /// Human-readable label used by the form.
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    pub fn all() -> [Gender; 2] {
        [Gender::Male, Gender::Female]
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the gender choices.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown gender: {0}")]
pub struct UnknownGender(pub String);

impl FromStr for Gender {
    type Err = UnknownGender;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(UnknownGender(s.to_string())),
        }
    }
}

/// Validated patient input.
///
/// Only [`crate::validation::Validator`] can build one, so holding a
/// `PatientInput` means every field constraint of the active profile held
/// at submission time.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PatientInput {
    gender: Gender,
    age: u32,
    weight_kg: f64,
    symptom_onset: NaiveDate,
}

impl PatientInput {
    pub(crate) fn new(gender: Gender, age: u32, weight_kg: f64, symptom_onset: NaiveDate) -> Self {
        Self {
            gender,
            age,
            weight_kg,
            symptom_onset,
        }
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    /// Age in whole years
    pub fn age(&self) -> u32 {
        self.age
    }

    /// Weight in kg (drives the calculation)
    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    /// Date the symptoms started
    pub fn symptom_onset(&self) -> NaiveDate {
        self.symptom_onset
    }
}
