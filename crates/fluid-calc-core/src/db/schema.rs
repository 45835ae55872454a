//! SQLite schema definition.

/// Complete database schema for the fluid calculator.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Usage Records (Append-Only)
-- ============================================================================

-- AUTOINCREMENT keeps ids from being reused after deletes
CREATE TABLE IF NOT EXISTS usage_records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    gender TEXT NOT NULL CHECK (gender IN ('male', 'female')),
    age INTEGER NOT NULL CHECK (age >= 0),
    weight REAL NOT NULL CHECK (weight > 0),
    symptom_onset_date TEXT NOT NULL,            -- YYYY-MM-DD
    created_at TEXT NOT NULL                     -- UTC, assigned on insert
);

CREATE INDEX IF NOT EXISTS idx_usage_records_created_at ON usage_records(created_at);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_schema_valid() {
        let conn = Connection::open_in_memory().unwrap();
        let result = conn.execute_batch(SCHEMA);
        assert!(result.is_ok(), "Schema should be valid SQL: {:?}", result);
    }

    #[test]
    fn test_schema_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        assert!(conn.execute_batch(SCHEMA).is_ok());
    }

    #[test]
    fn test_gender_constraint() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        let result = conn.execute(
            "INSERT INTO usage_records (gender, age, weight, symptom_onset_date, created_at)
             VALUES ('other', 3, 10.0, '2026-10-01', '2026-10-17 00:00:00+00:00')",
            [],
        );
        assert!(result.is_err());

        let result = conn.execute(
            "INSERT INTO usage_records (gender, age, weight, symptom_onset_date, created_at)
             VALUES ('male', 3, 10.0, '2026-10-01', '2026-10-17 00:00:00+00:00')",
            [],
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_weight_constraint() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        let result = conn.execute(
            "INSERT INTO usage_records (gender, age, weight, symptom_onset_date, created_at)
             VALUES ('female', 3, 0, '2026-10-01', '2026-10-17 00:00:00+00:00')",
            [],
        );
        assert!(result.is_err());
    }
}
