//! Usage record database operations.

use chrono::Utc;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbResult};
use crate::models::{Gender, PatientInput, UsageRecord};

impl ToSql for Gender {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Gender {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<UsageRecord> {
    Ok(UsageRecord {
        id: row.get(0)?,
        gender: row.get(1)?,
        age: row.get(2)?,
        weight_kg: row.get(3)?,
        symptom_onset: row.get(4)?,
        created_at: row.get(5)?,
    })
}

impl Database {
    /// Insert a validated input, assigning its id and creation timestamp.
    pub fn insert_record(&self, input: &PatientInput) -> DbResult<UsageRecord> {
        let created_at = Utc::now();
        self.conn.execute(
            r#"
            INSERT INTO usage_records (
                gender, age, weight, symptom_onset_date, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                input.gender(),
                input.age(),
                input.weight_kg(),
                input.symptom_onset(),
                created_at,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, "inserted usage record");

        Ok(UsageRecord {
            id,
            gender: input.gender(),
            age: input.age(),
            weight_kg: input.weight_kg(),
            symptom_onset: input.symptom_onset(),
            created_at,
        })
    }

    /// Get a record by ID.
    pub fn get_record(&self, id: i64) -> DbResult<Option<UsageRecord>> {
        self.conn
            .query_row(
                r#"
                SELECT id, gender, age, weight, symptom_onset_date, created_at
                FROM usage_records
                WHERE id = ?
                "#,
                [id],
                record_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all records in insertion order.
    pub fn list_records(&self) -> DbResult<Vec<UsageRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, gender, age, weight, symptom_onset_date, created_at
            FROM usage_records
            ORDER BY id
            "#,
        )?;

        let rows = stmt.query_map([], record_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Count stored records.
    pub fn count_records(&self) -> DbResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM usage_records", [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }
}
