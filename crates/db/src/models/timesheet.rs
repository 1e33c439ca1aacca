//! Month record model.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use t4w_core::aggregate::DayMap;
use t4w_core::types::{DbId, Timestamp};

/// One staff member's timesheet for one month (`YYYY-MM`).
///
/// `entries` is the full date-key to entry-list map stored as JSONB, and
/// `total_hours` is derived from it by the aggregator; the two are always
/// written together in a single statement so no partial state is ever
/// observable. `version` is bumped on every write and guards against a
/// concurrent writer silently overwriting the record.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MonthRecord {
    #[serde(skip)]
    pub id: DbId,
    #[serde(skip)]
    pub user_id: DbId,
    pub month: String,
    pub entries: Json<DayMap>,
    pub total_hours: f64,
    pub version: i64,
    #[serde(skip)]
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
