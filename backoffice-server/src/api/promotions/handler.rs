//! Promotion API handlers

use axum::{
    Json,
    extract::{Extension, Path, State},
};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Promotion, PromotionCreate, PromotionUpdate};
use crate::db::repository::PromotionRepository;
use crate::utils::{AppError, AppResult};

const RESOURCE: &str = "promotions";

/// GET /api/promotions
pub async fn list(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<Promotion>>> {
    let promotions = PromotionRepository::new(state.get_db())
        .find_all(&current_user.tenant)
        .await?;
    Ok(Json(promotions))
}

/// GET /api/promotions/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<Promotion>> {
    let promotion = PromotionRepository::new(state.get_db())
        .find_by_id(&current_user.tenant, &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Promotion {} not found", id)))?;
    Ok(Json(promotion))
}

/// POST /api/promotions
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<PromotionCreate>,
) -> AppResult<Json<Promotion>> {
    payload.validate()?;

    let promotion = PromotionRepository::new(state.get_db())
        .create(&current_user.tenant, payload)
        .await?;

    let id = promotion
        .id
        .as_ref()
        .map(|rid| rid.key().to_string())
        .unwrap_or_default();
    state.broadcast_sync(RESOURCE, "created", &id, Some(&promotion));
    Ok(Json(promotion))
}

/// PUT /api/promotions/:id
pub async fn update(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<PromotionUpdate>,
) -> AppResult<Json<Promotion>> {
    let promotion = PromotionRepository::new(state.get_db())
        .update(&current_user.tenant, &id, payload)
        .await?;

    state.broadcast_sync(RESOURCE, "updated", &id, Some(&promotion));
    Ok(Json(promotion))
}

/// POST /api/promotions/:id/toggle
pub async fn toggle_active(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<Promotion>> {
    let promotion = PromotionRepository::new(state.get_db())
        .toggle_active(&current_user.tenant, &id)
        .await?;

    state.broadcast_sync(RESOURCE, "updated", &id, Some(&promotion));
    Ok(Json(promotion))
}

/// DELETE /api/promotions/:id
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    PromotionRepository::new(state.get_db())
        .delete(&current_user.tenant, &id)
        .await?;
    state.broadcast_sync(RESOURCE, "deleted", &id, None::<&Promotion>);
    Ok(Json(serde_json::json!({ "deleted": id })))
}
