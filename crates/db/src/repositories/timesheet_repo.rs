//! Repository for the `timesheets` table (one row per staff member per month).

use sqlx::types::Json;
use sqlx::PgPool;
use t4w_core::aggregate::DayMap;
use t4w_core::types::DbId;

use crate::models::timesheet::MonthRecord;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, month, entries, total_hours, version, created_at, updated_at";

/// Provides read and atomic-replace operations for month records.
pub struct TimesheetRepo;

impl TimesheetRepo {
    /// Load the month record for a staff member, if one exists.
    ///
    /// A missing record is not an error; callers treat it as an empty
    /// month (empty map, zero total, version 0).
    pub async fn find(
        pool: &PgPool,
        user_id: DbId,
        month: &str,
    ) -> Result<Option<MonthRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM timesheets WHERE user_id = $1 AND month = $2");
        sqlx::query_as::<_, MonthRecord>(&query)
            .bind(user_id)
            .bind(month)
            .fetch_optional(pool)
            .await
    }

    /// Atomically replace a month record's entries and total in one
    /// statement, creating the record if absent.
    ///
    /// `expected_version` is the version the caller read before mutating
    /// (0 when the record did not exist). The update only applies when the
    /// stored version still matches, so a write racing another mutation
    /// returns `None` instead of silently overwriting it; the caller
    /// surfaces that as a conflict.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        month: &str,
        entries: &DayMap,
        total_hours: f64,
        expected_version: i64,
    ) -> Result<Option<MonthRecord>, sqlx::Error> {
        let query = format!(
            "INSERT INTO timesheets (user_id, month, entries, total_hours, version)
             VALUES ($1, $2, $3, $4, 1)
             ON CONFLICT ON CONSTRAINT uq_timesheets_user_month DO UPDATE
             SET entries = EXCLUDED.entries,
                 total_hours = EXCLUDED.total_hours,
                 version = timesheets.version + 1,
                 updated_at = NOW()
             WHERE timesheets.version = $5
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MonthRecord>(&query)
            .bind(user_id)
            .bind(month)
            .bind(Json(entries))
            .bind(total_hours)
            .bind(expected_version)
            .fetch_optional(pool)
            .await
    }
}
