//! Scheduled post API handlers

use axum::{
    Json,
    extract::{Extension, Path, State},
};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{ScheduledPost, ScheduledPostCreate, ScheduledPostUpdate};
use crate::db::repository::ScheduledPostRepository;
use crate::utils::{AppError, AppResult};

const RESOURCE: &str = "scheduled_posts";

/// GET /api/scheduled-posts
pub async fn list(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<ScheduledPost>>> {
    let posts = ScheduledPostRepository::new(state.get_db())
        .find_all(&current_user.tenant)
        .await?;
    Ok(Json(posts))
}

/// GET /api/scheduled-posts/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<ScheduledPost>> {
    let post = ScheduledPostRepository::new(state.get_db())
        .find_by_id(&current_user.tenant, &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Scheduled post {} not found", id)))?;
    Ok(Json(post))
}

/// POST /api/scheduled-posts
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<ScheduledPostCreate>,
) -> AppResult<Json<ScheduledPost>> {
    payload.validate()?;

    let post = ScheduledPostRepository::new(state.get_db())
        .create(&current_user.tenant, payload)
        .await?;

    let id = post
        .id
        .as_ref()
        .map(|rid| rid.key().to_string())
        .unwrap_or_default();
    state.broadcast_sync(RESOURCE, "created", &id, Some(&post));
    Ok(Json(post))
}

/// PUT /api/scheduled-posts/:id
pub async fn update(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<ScheduledPostUpdate>,
) -> AppResult<Json<ScheduledPost>> {
    let post = ScheduledPostRepository::new(state.get_db())
        .update(&current_user.tenant, &id, payload)
        .await?;

    state.broadcast_sync(RESOURCE, "updated", &id, Some(&post));
    Ok(Json(post))
}

/// DELETE /api/scheduled-posts/:id
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    ScheduledPostRepository::new(state.get_db())
        .delete(&current_user.tenant, &id)
        .await?;
    state.broadcast_sync(RESOURCE, "deleted", &id, None::<&ScheduledPost>);
    Ok(Json(serde_json::json!({ "deleted": id })))
}
