//! Record lifecycle: persist validated inputs and read them back.
//!
//! Storage sits behind [`RecordStore`], which owns id and timestamp
//! assignment. [`RecordService`] attaches the calculation for the active
//! rule variant on the way out.

use crate::calculator::RuleVariant;
use crate::db::{Database, DbResult};
use crate::models::{PatientInput, RecordView, UsageRecord};

/// Storage collaborator for usage records.
pub trait RecordStore {
    /// Persist an input; the returned record carries the assigned id and timestamp.
    fn save(&self, input: &PatientInput) -> DbResult<UsageRecord>;

    /// All records in a stable order.
    fn list_all(&self) -> DbResult<Vec<UsageRecord>>;

    fn get(&self, id: i64) -> DbResult<Option<UsageRecord>>;
}

impl RecordStore for Database {
    fn save(&self, input: &PatientInput) -> DbResult<UsageRecord> {
        self.insert_record(input)
    }

    fn list_all(&self) -> DbResult<Vec<UsageRecord>> {
        self.list_records()
    }

    fn get(&self, id: i64) -> DbResult<Option<UsageRecord>> {
        self.get_record(id)
    }
}

/// Creates and reads records for one rule variant.
pub struct RecordService<'a, S: RecordStore + ?Sized> {
    store: &'a S,
    variant: RuleVariant,
}

impl<'a, S: RecordStore + ?Sized> RecordService<'a, S> {
    pub fn new(store: &'a S, variant: RuleVariant) -> Self {
        Self { store, variant }
    }

    /// Persist a validated input and attach its calculation.
    ///
    /// Storage errors are returned as-is; nothing is retried.
    pub fn create_record(&self, input: &PatientInput) -> DbResult<RecordView> {
        let record = self.store.save(input)?;
        tracing::info!("created {}", record);
        Ok(record.view(self.variant))
    }

    pub fn list_records(&self) -> DbResult<Vec<UsageRecord>> {
        self.store.list_all()
    }

    pub fn find_record(&self, id: i64) -> DbResult<Option<RecordView>> {
        Ok(self.store.get(id)?.map(|record| record.view(self.variant)))
    }
}
