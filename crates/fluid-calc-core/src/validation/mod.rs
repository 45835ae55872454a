//! Form validation for patient submissions.
//!
//! Every field is checked on each pass and all messages are collected, so a
//! re-rendered form can show every problem at once.

mod date_window;

pub use date_window::*;

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Gender, PatientInput};
use crate::profile::RuleProfile;

pub const FIELD_GENDER: &str = "gender";
pub const FIELD_AGE: &str = "age";
pub const FIELD_WEIGHT: &str = "weight";
pub const FIELD_DATE: &str = "date_input";

pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const INVALID_CHOICE_MESSAGE: &str = "Not a valid choice.";
pub const INVALID_INTEGER_MESSAGE: &str = "Not a valid integer value.";
pub const INVALID_DECIMAL_MESSAGE: &str = "Not a valid decimal value.";
pub const INVALID_DATE_MESSAGE: &str = "Not a valid date value.";
pub const WEIGHT_TOO_LARGE_MESSAGE: &str = "Number is too large to calculate a volume.";

/// Raw form values exactly as submitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RawSubmission {
    pub gender: Option<String>,
    pub age: Option<String>,
    pub weight: Option<String>,
    pub date_input: Option<String>,
}

impl RawSubmission {
    /// Submitted value for a field, if any.
    pub fn value(&self, field: &str) -> Option<&str> {
        match field {
            FIELD_GENDER => self.gender.as_deref(),
            FIELD_AGE => self.age.as_deref(),
            FIELD_WEIGHT => self.weight.as_deref(),
            FIELD_DATE => self.date_input.as_deref(),
            _ => None,
        }
    }
}

/// Field name → messages, in field-name order.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.fields().collect();
        write!(f, "{}", fields.join(", "))
    }
}

/// A rejected submission: the messages plus the values to re-populate the form.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid fields: {errors}")]
pub struct InvalidSubmission {
    pub errors: FieldErrors,
    pub raw: RawSubmission,
}

/// Validates raw submissions against a [`RuleProfile`].
#[derive(Debug, Clone, Copy)]
pub struct Validator {
    profile: RuleProfile,
}

impl Validator {
    pub fn new(profile: RuleProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &RuleProfile {
        &self.profile
    }

    /// Validate a submission relative to `today`.
    pub fn validate(
        &self,
        raw: &RawSubmission,
        today: NaiveDate,
    ) -> Result<PatientInput, InvalidSubmission> {
        let mut errors = FieldErrors::default();

        let gender = self.check_gender(raw.gender.as_deref(), &mut errors);
        let age = self.check_age(raw.age.as_deref(), &mut errors);
        let weight = self.check_weight(raw.weight.as_deref(), &mut errors);
        let onset = self.check_date(raw.date_input.as_deref(), today, &mut errors);

        match (gender, age, weight, onset) {
            (Some(gender), Some(age), Some(weight), Some(onset)) if errors.is_empty() => {
                Ok(PatientInput::new(gender, age, weight, onset))
            }
            _ => Err(InvalidSubmission {
                errors,
                raw: raw.clone(),
            }),
        }
    }

    fn check_gender(&self, value: Option<&str>, errors: &mut FieldErrors) -> Option<Gender> {
        let value = required(FIELD_GENDER, value, errors)?;
        match value.parse() {
            Ok(gender) => Some(gender),
            Err(_) => {
                errors.add(FIELD_GENDER, INVALID_CHOICE_MESSAGE);
                None
            }
        }
    }

    fn check_age(&self, value: Option<&str>, errors: &mut FieldErrors) -> Option<u32> {
        let value = required(FIELD_AGE, value, errors)?;
        let Ok(age) = value.parse::<i64>() else {
            errors.add(FIELD_AGE, INVALID_INTEGER_MESSAGE);
            return None;
        };
        if age < i64::from(self.profile.min_age) {
            errors.add(FIELD_AGE, at_least(self.profile.min_age));
            return None;
        }
        match u32::try_from(age) {
            Ok(age) => Some(age),
            Err(_) => {
                errors.add(FIELD_AGE, INVALID_INTEGER_MESSAGE);
                None
            }
        }
    }

    fn check_weight(&self, value: Option<&str>, errors: &mut FieldErrors) -> Option<f64> {
        let value = required(FIELD_WEIGHT, value, errors)?;
        let weight = match value.parse::<f64>() {
            Ok(weight) if weight.is_finite() => weight,
            _ => {
                errors.add(FIELD_WEIGHT, INVALID_DECIMAL_MESSAGE);
                return None;
            }
        };
        if weight <= 0.0 || weight < self.profile.min_weight_kg {
            errors.add(FIELD_WEIGHT, at_least(self.profile.min_weight_kg));
            return None;
        }
        // Volume must stay finite under the active rule
        if !self.profile.variant.calculate(weight).total_volume_ml.is_finite() {
            errors.add(FIELD_WEIGHT, WEIGHT_TOO_LARGE_MESSAGE);
            return None;
        }
        Some(weight)
    }

    fn check_date(
        &self,
        value: Option<&str>,
        today: NaiveDate,
        errors: &mut FieldErrors,
    ) -> Option<NaiveDate> {
        let value = required(FIELD_DATE, value, errors)?;
        let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") else {
            errors.add(FIELD_DATE, INVALID_DATE_MESSAGE);
            return None;
        };
        if !self.profile.date_window.contains(date, today) {
            errors.add(FIELD_DATE, self.profile.date_window.violation_message());
            return None;
        }
        Some(date)
    }
}

/// Trimmed non-empty value, or a required-field error.
fn required<'a>(field: &str, value: Option<&'a str>, errors: &mut FieldErrors) -> Option<&'a str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Some(v),
        _ => {
            errors.add(field, REQUIRED_MESSAGE);
            None
        }
    }
}

fn at_least(min: impl fmt::Display) -> String {
    format!("Number must be at least {min}.")
}
