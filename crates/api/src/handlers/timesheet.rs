//! Handlers for the `/timesheets` resource.
//!
//! Staff read their own month record and mutate it one entry at a time.
//! Every mutation is a sequential read-modify-write: load the month's full
//! day map (or start empty), apply exactly one change to one day's list,
//! recompute the month total over the whole map, and persist entries plus
//! total atomically. A version check at the write guards against a
//! concurrent mutation being silently overwritten.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use t4w_core::aggregate::{compute_daily_hours, compute_month_total, DayMap, OvernightPolicy};
use t4w_core::entries::{add_entry, delete_entry, edit_entry};
use t4w_core::error::CoreError;
use t4w_core::event::{Event, EventType, Location};
use t4w_core::keys::{validate_date_key, validate_month_key};
use t4w_core::time::is_valid_hhmm;
use t4w_core::types::{DbId, EntryId};
use t4w_db::models::timesheet::MonthRecord;
use t4w_db::repositories::TimesheetRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for adding or editing a timesheet entry.
///
/// The entry id is never part of the body: adds generate one, edits take it
/// from the path. Labels and the recorded-at stamp are assigned server-side.
#[derive(Debug, Deserialize)]
pub struct EntryInput {
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Zero-padded `HH:MM`.
    pub time: String,
    pub comment: Option<String>,
    pub location: Option<Location>,
}

/// A month record as returned to clients. Months with no stored record are
/// served as an empty map with a zero total and version 0.
#[derive(Debug, Serialize)]
pub struct MonthResponse {
    pub month: String,
    pub entries: DayMap,
    pub total_hours: f64,
    pub version: i64,
    /// Worked hours per day, keyed like `entries`; saves clients
    /// re-deriving the daily figures the calendar shows.
    pub daily_hours: std::collections::BTreeMap<String, f64>,
}

impl MonthResponse {
    fn empty(month: &str) -> Self {
        MonthResponse {
            month: month.to_string(),
            entries: DayMap::new(),
            total_hours: 0.0,
            version: 0,
            daily_hours: Default::default(),
        }
    }

    fn from_record(record: MonthRecord) -> AppResult<Self> {
        let entries = record.entries.0;
        // Reads never enforce the overnight policy; that happens on
        // mutation. A stored record containing an overnight day was
        // necessarily written while the wrap policy was active, so wrapping
        // here keeps the daily figures consistent with the stored total
        // even after the policy is switched back to reject.
        let daily_hours = entries
            .iter()
            .map(|(date, events)| {
                Ok((date.clone(), compute_daily_hours(events, OvernightPolicy::NextDay)?))
            })
            .collect::<Result<_, CoreError>>()?;

        Ok(MonthResponse {
            month: record.month,
            entries,
            total_hours: record.total_hours,
            version: record.version,
            daily_hours,
        })
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/timesheets/{month}
///
/// The authenticated account's month record; a missing record is an empty
/// month, not an error.
pub async fn get_month(
    State(state): State<AppState>,
    user: AuthUser,
    Path(month): Path<String>,
) -> AppResult<Json<MonthResponse>> {
    validate_month_key(&month)?;
    fetch_month(&state, user.user_id, &month).await.map(Json)
}

/// POST /api/v1/timesheets/{month}/days/{date}/entries
///
/// Add one entry to one day. Returns the updated month record with 201.
pub async fn create_entry(
    State(state): State<AppState>,
    user: AuthUser,
    Path((month, date)): Path<(String, String)>,
    Json(input): Json<EntryInput>,
) -> AppResult<(StatusCode, Json<MonthResponse>)> {
    let event = build_event(input)?;
    let response = mutate_day(&state, user.user_id, &month, &date, move |day| {
        add_entry(day, event);
        Ok(())
    })
    .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// PUT /api/v1/timesheets/{month}/days/{date}/entries/{id}
///
/// Replace the entry wholesale; the stored entry keeps its id and gains
/// the edited flag.
pub async fn update_entry(
    State(state): State<AppState>,
    user: AuthUser,
    Path((month, date, entry_id)): Path<(String, String, EntryId)>,
    Json(input): Json<EntryInput>,
) -> AppResult<Json<MonthResponse>> {
    let event = build_event(input)?;
    let response = mutate_day(&state, user.user_id, &month, &date, move |day| {
        edit_entry(day, entry_id, event)
    })
    .await?;
    Ok(Json(response))
}

/// DELETE /api/v1/timesheets/{month}/days/{date}/entries/{id}
///
/// Remove one entry. The day's (possibly now empty) list stays in place.
pub async fn remove_entry(
    State(state): State<AppState>,
    user: AuthUser,
    Path((month, date, entry_id)): Path<(String, String, EntryId)>,
) -> AppResult<Json<MonthResponse>> {
    let response = mutate_day(&state, user.user_id, &month, &date, move |day| {
        delete_entry(day, entry_id)
    })
    .await?;
    Ok(Json(response))
}

// ---------------------------------------------------------------------------
// Shared logic
// ---------------------------------------------------------------------------

/// Load a month record, serving missing ones as an empty month.
pub(crate) async fn fetch_month(
    state: &AppState,
    user_id: DbId,
    month: &str,
) -> AppResult<MonthResponse> {
    match TimesheetRepo::find(&state.pool, user_id, month).await? {
        Some(record) => MonthResponse::from_record(record),
        None => Ok(MonthResponse::empty(month)),
    }
}

/// Validate an entry body and turn it into an [`Event`] (id assigned later).
fn build_event(input: EntryInput) -> Result<Event, CoreError> {
    if !is_valid_hhmm(&input.time) {
        return Err(CoreError::Validation(format!(
            "Invalid time '{}': expected zero-padded HH:MM",
            input.time
        )));
    }

    if input.event_type.requires_location() && input.location.is_none() {
        return Err(CoreError::Validation(format!(
            "Entry type '{}' requires a location",
            input.event_type.label()
        )));
    }

    Ok(Event {
        id: 0, // assigned by add_entry / overwritten by edit_entry
        event_type: input.event_type,
        label: input.event_type.label().to_string(),
        time: input.time,
        comment: input.comment.filter(|c| !c.is_empty()),
        location: input.location,
        recorded_at: Some(Utc::now()),
        is_edited: false,
    })
}

/// The read-modify-write cycle shared by every mutation.
///
/// Applies `mutate` to the addressed day's list, recomputes the month
/// total over the entire updated map, and writes map + total back in one
/// statement. If the record changed underneath us the conditional write
/// matches nothing and the mutation fails with a conflict instead of
/// overwriting the other writer.
async fn mutate_day<F>(
    state: &AppState,
    user_id: DbId,
    month: &str,
    date: &str,
    mutate: F,
) -> AppResult<MonthResponse>
where
    F: FnOnce(&mut Vec<Event>) -> Result<(), CoreError>,
{
    validate_date_key(date, month)?;

    let (mut entries, expected_version) =
        match TimesheetRepo::find(&state.pool, user_id, month).await? {
            Some(record) => (record.entries.0, record.version),
            None => (DayMap::new(), 0),
        };

    // Deleting the last entry leaves an empty list in place.
    let day = entries.entry(date.to_string()).or_default();
    mutate(day)?;

    let total_hours = compute_month_total(&entries, state.config.overnight_policy)?;

    let saved = TimesheetRepo::upsert(
        &state.pool,
        user_id,
        month,
        &entries,
        total_hours,
        expected_version,
    )
    .await?
    .ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            "Timesheet was modified concurrently; reload and retry".into(),
        ))
    })?;

    tracing::debug!(user_id, month, date, total_hours, "timesheet mutation committed");

    MonthResponse::from_record(saved)
}
