//! Feedback API handlers

use axum::{
    Json,
    extract::{Extension, Path, State},
};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Feedback, FeedbackCreate};
use crate::db::repository::FeedbackRepository;
use crate::utils::{AppError, AppResult};

const RESOURCE: &str = "feedbacks";

/// GET /api/feedbacks
pub async fn list(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<Feedback>>> {
    let entries = FeedbackRepository::new(state.get_db())
        .find_all(&current_user.tenant)
        .await?;
    Ok(Json(entries))
}

/// GET /api/feedbacks/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<Feedback>> {
    let entry = FeedbackRepository::new(state.get_db())
        .find_by_id(&current_user.tenant, &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Feedback {} not found", id)))?;
    Ok(Json(entry))
}

/// POST /api/feedbacks
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<FeedbackCreate>,
) -> AppResult<Json<Feedback>> {
    payload.validate()?;

    let entry = FeedbackRepository::new(state.get_db())
        .create(&current_user.tenant, payload)
        .await?;

    let id = entry
        .id
        .as_ref()
        .map(|rid| rid.key().to_string())
        .unwrap_or_default();
    state.broadcast_sync(RESOURCE, "created", &id, Some(&entry));
    Ok(Json(entry))
}

/// DELETE /api/feedbacks/:id
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    FeedbackRepository::new(state.get_db())
        .delete(&current_user.tenant, &id)
        .await?;
    state.broadcast_sync(RESOURCE, "deleted", &id, None::<&Feedback>);
    Ok(Json(serde_json::json!({ "deleted": id })))
}
