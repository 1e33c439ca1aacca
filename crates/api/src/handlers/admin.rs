//! Handlers for the `/admin` resource (staff management, timesheet review).
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use t4w_core::error::CoreError;
use t4w_core::keys::validate_month_key;
use t4w_core::roles::{is_known_role, ROLE_STAFF};
use t4w_core::types::DbId;
use t4w_db::models::user::{CreateUser, UpdateUser, UserResponse};
use t4w_db::repositories::{SessionRepo, UserRepo};
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::handlers::timesheet::{self, MonthResponse};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Minimum password length enforced on account creation and password reset.
const MIN_PASSWORD_LENGTH: usize = 12;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/staff`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateStaffRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    pub password: String,
    /// `"staff"` (default) or `"admin"`.
    pub role: Option<String>,
    /// URL on the external image host; the upload itself happens
    /// client-side.
    #[validate(url(message = "photo_url must be a valid URL"))]
    pub photo_url: Option<String>,
}

/// Request body for `PUT /admin/staff/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStaffRequest {
    pub name: Option<String>,
    #[validate(email(message = "invalid email address"))]
    pub email: Option<String>,
    pub role: Option<String>,
    #[validate(url(message = "photo_url must be a valid URL"))]
    pub photo_url: Option<String>,
}

/// Request body for `POST /admin/staff/{id}/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/staff
///
/// List all active staff accounts.
pub async fn list_staff(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<UserResponse>>> {
    let staff = UserRepo::list_staff(&state.pool).await?;
    Ok(Json(staff.iter().map(UserResponse::from).collect()))
}

/// POST /api/v1/admin/staff
///
/// Create a new account. Validates password strength, hashes it, and
/// returns a safe [`UserResponse`] with 201 Created.
pub async fn create_staff(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateStaffRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let role = input.role.unwrap_or_else(|| ROLE_STAFF.to_string());
    if !is_known_role(&role) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown role '{role}'"
        ))));
    }

    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create_dto = CreateUser {
        name: input.name,
        email: input.email,
        password_hash: hashed,
        role,
        photo_url: input.photo_url,
    };

    let user = UserRepo::create(&state.pool, &create_dto).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// PUT /api/v1/admin/staff/{id}
///
/// Update profile fields (not password).
pub async fn update_staff(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStaffRequest>,
) -> AppResult<Json<UserResponse>> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    if let Some(role) = &input.role {
        if !is_known_role(role) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown role '{role}'"
            ))));
        }
    }

    let update_dto = UpdateUser {
        name: input.name,
        email: input.email,
        role: input.role,
        photo_url: input.photo_url,
        is_active: None,
    };

    let user = UserRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    Ok(Json(UserResponse::from(&user)))
}

/// POST /api/v1/admin/staff/{id}/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    validate_password_strength(&input.new_password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let hashed = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let updated = UserRepo::set_password_hash(&state.pool, id, &hashed).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }

    // Force re-authentication everywhere.
    SessionRepo::revoke_all_for_user(&state.pool, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/admin/staff/{id}
///
/// Deactivate an account. Timesheet history is preserved.
pub async fn delete_staff(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.user_id {
        return Err(AppError::Core(CoreError::Validation(
            "Cannot deactivate your own account".into(),
        )));
    }

    let deactivated = UserRepo::deactivate(&state.pool, id).await?;
    if !deactivated {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }

    SessionRepo::revoke_all_for_user(&state.pool, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/admin/staff/{id}/timesheets/{month}
///
/// Read-only view of one staff member's month record.
pub async fn get_staff_month(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path((id, month)): Path<(DbId, String)>,
) -> AppResult<Json<MonthResponse>> {
    validate_month_key(&month)?;

    // 404 for unknown accounts, empty month for known ones with no record.
    UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    timesheet::fetch_month(&state, id, &month).await.map(Json)
}
