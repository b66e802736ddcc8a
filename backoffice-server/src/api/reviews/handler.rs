//! Review proxy handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use serde_json::Value;

use crate::core::ServerState;
use crate::services::ReviewProxyError;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsQuery {
    pub place_id: Option<String>,
}

/// GET /getGoogleReviews?placeId=...
pub async fn get_reviews(
    State(state): State<ServerState>,
    Query(query): Query<ReviewsQuery>,
) -> Result<Json<Value>, ReviewProxyError> {
    let place_id = query.place_id.ok_or(ReviewProxyError::MissingPlaceId)?;
    let result = state.review_service.get_reviews(&place_id).await?;
    Ok(Json(result))
}

/// POST /getGoogleReviews - placeId accepted in query or JSON body
pub async fn post_reviews(
    State(state): State<ServerState>,
    Query(query): Query<ReviewsQuery>,
    body: String,
) -> Result<Json<Value>, ReviewProxyError> {
    let place_id = query
        .place_id
        .or_else(|| {
            serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.get("placeId").and_then(Value::as_str).map(str::to_string))
        })
        .ok_or(ReviewProxyError::MissingPlaceId)?;

    let result = state.review_service.get_reviews(&place_id).await?;
    Ok(Json(result))
}
