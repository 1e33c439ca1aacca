//! Route definitions for the `/admin` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`. Every handler enforces the admin role.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/staff", get(admin::list_staff).post(admin::create_staff))
        .route("/staff/{id}", put(admin::update_staff).delete(admin::delete_staff))
        .route("/staff/{id}/reset-password", post(admin::reset_password))
        .route("/staff/{id}/timesheets/{month}", get(admin::get_staff_month))
}
