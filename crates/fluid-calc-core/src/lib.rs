//! Fluid-Calc Core Library
//!
//! Weight-based daily fluid volume calculation with persisted usage records.
//!
//! # Architecture
//!
//! ```text
//! Raw form values
//!        │
//!        ▼
//!   Validation ──── rejected ───► field errors + raw values (re-render form)
//!        │
//!    accepted (PatientInput)
//!        │
//!        ▼
//!   RecordStore::save  (assigns id + created_at)
//!        │
//!        ▼
//!   Calculator (active RuleVariant) ───► RecordView (render)
//!
//!   RecordStore::list_all ───► RecordSummary[] (JSON listing)
//! ```
//!
//! # Modules
//!
//! - [`calculator`]: Piecewise fluid volume rule tables
//! - [`validation`]: Form validation and date window policies
//! - [`profile`]: Per-deployment rule selection
//! - [`models`]: Domain types (PatientInput, UsageRecord, projections)
//! - [`db`]: SQLite storage
//! - [`records`]: Record lifecycle over a storage collaborator

pub mod calculator;
pub mod db;
pub mod models;
pub mod profile;
pub mod records;
pub mod validation;

// Re-export commonly used types
pub use calculator::{FluidCalculation, RuleVariant};
pub use db::Database;
pub use models::{Gender, PatientInput, RecordSummary, RecordView, UsageRecord};
pub use profile::RuleProfile;
pub use records::{RecordService, RecordStore};
pub use validation::{DateWindow, FieldErrors, InvalidSubmission, RawSubmission, Validator};

use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

// =========================================================================
// Error Type
// =========================================================================

#[derive(Debug, thiserror::Error)]
pub enum FluidCalcError {
    #[error("Database error: {0}")]
    Database(#[from] db::DbError),

    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),
}

impl<T> From<std::sync::PoisonError<T>> for FluidCalcError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        FluidCalcError::LockPoisoned(e.to_string())
    }
}

/// Outcome of a form submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Stored and calculated
    Accepted(RecordView),
    /// Validation failed; nothing was stored
    Rejected(InvalidSubmission),
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe entry point shared by request handlers.
#[derive(Clone)]
pub struct FluidCalcCore {
    db: Arc<Mutex<Database>>,
    profile: RuleProfile,
}

impl FluidCalcCore {
    /// Open or create a database at the given path.
    pub fn open<P: AsRef<Path>>(path: P, profile: RuleProfile) -> Result<Self, FluidCalcError> {
        let db = Database::open(path)?;
        Ok(Self::with_database(db, profile))
    }

    /// Create an in-memory database (for testing).
    pub fn open_in_memory(profile: RuleProfile) -> Result<Self, FluidCalcError> {
        let db = Database::open_in_memory()?;
        Ok(Self::with_database(db, profile))
    }

    pub fn with_database(db: Database, profile: RuleProfile) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
            profile,
        }
    }

    pub fn profile(&self) -> &RuleProfile {
        &self.profile
    }

    /// Validate, store and calculate a submission, using today's local date
    /// for the date window.
    pub fn submit(&self, raw: &RawSubmission) -> Result<Submission, FluidCalcError> {
        self.submit_on(raw, chrono::Local::now().date_naive())
    }

    /// Same as [`FluidCalcCore::submit`] with an explicit "today".
    pub fn submit_on(
        &self,
        raw: &RawSubmission,
        today: NaiveDate,
    ) -> Result<Submission, FluidCalcError> {
        let input = match Validator::new(self.profile).validate(raw, today) {
            Ok(input) => input,
            Err(rejected) => return Ok(Submission::Rejected(rejected)),
        };

        let db = self.db.lock()?;
        let view = RecordService::new(&*db, self.profile.variant).create_record(&input)?;
        Ok(Submission::Accepted(view))
    }

    /// Listing projection of every stored record.
    pub fn list_records(&self) -> Result<Vec<RecordSummary>, FluidCalcError> {
        let db = self.db.lock()?;
        let records = RecordService::new(&*db, self.profile.variant).list_records()?;
        Ok(records.iter().map(UsageRecord::summary).collect())
    }

    /// A stored record with its calculation, if it exists.
    pub fn find_record(&self, id: i64) -> Result<Option<RecordView>, FluidCalcError> {
        let db = self.db.lock()?;
        Ok(RecordService::new(&*db, self.profile.variant).find_record(id)?)
    }

    pub fn record_count(&self) -> Result<u64, FluidCalcError> {
        let db = self.db.lock()?;
        Ok(db.count_records()?)
    }
}
