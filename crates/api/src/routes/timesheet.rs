//! Route definitions for the `/timesheets` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::timesheet;
use crate::state::AppState;

/// Routes mounted at `/timesheets`. All require authentication; staff
/// always operate on their own record.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{month}", get(timesheet::get_month))
        .route("/{month}/days/{date}/entries", post(timesheet::create_entry))
        .route(
            "/{month}/days/{date}/entries/{id}",
            put(timesheet::update_entry).delete(timesheet::remove_entry),
        )
}
