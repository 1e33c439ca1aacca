pub mod admin;
pub mod auth;
pub mod health;
pub mod timesheet;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout (requires auth)
/// /auth/me                                         current profile (requires auth)
///
/// /timesheets/{month}                              own month record
/// /timesheets/{month}/days/{date}/entries          add entry
/// /timesheets/{month}/days/{date}/entries/{id}     edit, delete entry
///
/// /admin/staff                                     list, create (admin only)
/// /admin/staff/{id}                                update, deactivate
/// /admin/staff/{id}/reset-password                 reset password
/// /admin/staff/{id}/timesheets/{month}             read-only month view
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/timesheets", timesheet::router())
        .nest("/admin", admin::router())
}
