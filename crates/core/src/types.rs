/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar date a task was worked on (`YYYY-MM-DD` on the wire).
pub type WorkDate = chrono::NaiveDate;
