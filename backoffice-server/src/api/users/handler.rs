//! Staff user API handlers
//!
//! `StaffUser` skips `password_hash` on serialization, so these responses
//! never carry credentials.

use axum::{
    Json,
    extract::{Extension, Path, State},
};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{StaffUser, StaffUserCreate, StaffUserUpdate};
use crate::db::repository::StaffUserRepository;
use crate::utils::{AppError, AppResult};

const RESOURCE: &str = "users";

/// GET /api/users
pub async fn list(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<StaffUser>>> {
    let users = StaffUserRepository::new(state.get_db())
        .find_all(&current_user.tenant)
        .await?;
    Ok(Json(users))
}

/// GET /api/users/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<StaffUser>> {
    let user = StaffUserRepository::new(state.get_db())
        .find_by_id(&current_user.tenant, &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Staff user {} not found", id)))?;
    Ok(Json(user))
}

/// POST /api/users
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<StaffUserCreate>,
) -> AppResult<Json<StaffUser>> {
    payload.validate()?;

    let user = StaffUserRepository::new(state.get_db())
        .create(&current_user.tenant, payload)
        .await?;

    let id = user
        .id
        .as_ref()
        .map(|rid| rid.key().to_string())
        .unwrap_or_default();
    state.broadcast_sync(RESOURCE, "created", &id, Some(&user));
    Ok(Json(user))
}

/// PUT /api/users/:id
pub async fn update(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<StaffUserUpdate>,
) -> AppResult<Json<StaffUser>> {
    let user = StaffUserRepository::new(state.get_db())
        .update(&current_user.tenant, &id, payload)
        .await?;

    state.broadcast_sync(RESOURCE, "updated", &id, Some(&user));
    Ok(Json(user))
}

/// DELETE /api/users/:id
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    StaffUserRepository::new(state.get_db())
        .delete(&current_user.tenant, &id)
        .await?;
    state.broadcast_sync(RESOURCE, "deleted", &id, None::<&StaffUser>);
    Ok(Json(serde_json::json!({ "deleted": id })))
}
