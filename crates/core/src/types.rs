/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Timesheet entry ids are Unix-epoch milliseconds at creation time,
/// unique within one day's entry list.
pub type EntryId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
