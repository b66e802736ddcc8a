//! Order API handlers

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Order, OrderCreate};
use crate::db::repository::OrderRepository;
use crate::orders::{
    DateFilter, DebitReport, KanbanColumn, OrderLifecycleService, TypeFilter, default_columns,
    derive_columns,
};
use crate::utils::time::{parse_date, today_local};
use crate::utils::{AppError, AppResult};
use shared::order::{OrderStatus, OrderType};

const RESOURCE: &str = "orders";

fn lifecycle(state: &ServerState) -> OrderLifecycleService {
    OrderLifecycleService::new(state.get_db(), state.event_bus.clone())
}

/// GET /api/orders
pub async fn list(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.get_db())
        .find_all(&current_user.tenant)
        .await?;
    Ok(Json(orders))
}

/// GET /api/orders/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = OrderRepository::new(state.get_db())
        .find_by_id(&current_user.tenant, &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;
    Ok(Json(order))
}

/// POST /api/orders
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<Order>> {
    payload.validate()?;

    let order = OrderRepository::new(state.get_db())
        .create(&current_user.tenant, payload)
        .await?;

    let id = order
        .id
        .as_ref()
        .map(|rid| rid.key().to_string())
        .unwrap_or_default();
    state.broadcast_sync(RESOURCE, "created", &id, Some(&order));

    Ok(Json(order))
}

/// POST /api/orders/:id/advance
pub async fn advance(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = lifecycle(&state).advance(&current_user.tenant, &id).await?;
    Ok(Json(order))
}

#[derive(Debug, Deserialize)]
pub struct ReassignRequest {
    pub status: OrderStatus,
}

/// POST /api/orders/:id/status - drag-and-drop reassignment
pub async fn reassign_status(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(req): Json<ReassignRequest>,
) -> AppResult<Json<Order>> {
    let order = lifecycle(&state)
        .reassign_status(&current_user.tenant, &id, req.status)
        .await?;
    Ok(Json(order))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizeResponse {
    pub order: Order,
    pub debit: DebitReport,
}

/// POST /api/orders/:id/finalize
pub async fn finalize(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<FinalizeResponse>> {
    let outcome = lifecycle(&state)
        .finalize(&current_user.tenant, &id)
        .await?;
    Ok(Json(FinalizeResponse {
        order: outcome.order,
        debit: outcome.debit,
    }))
}

/// DELETE /api/orders/:id
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    OrderRepository::new(state.get_db())
        .delete(&current_user.tenant, &id)
        .await?;
    state.broadcast_sync(RESOURCE, "deleted", &id, None::<&Order>);
    Ok(Json(serde_json::json!({ "deleted": id })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KanbanQuery {
    /// today (default) | week | custom | all
    pub date_filter: Option<String>,
    /// YYYY-MM-DD, required when dateFilter = custom
    pub custom_date: Option<String>,
    /// all (default) | Delivery | No Restaurante
    pub type_filter: Option<String>,
}

/// GET /api/orders/kanban
pub async fn kanban(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Query(query): Query<KanbanQuery>,
) -> AppResult<Json<Vec<KanbanColumn>>> {
    let date_filter = match query.date_filter.as_deref().unwrap_or("today") {
        "today" => DateFilter::Today,
        "week" => DateFilter::Week,
        "all" => DateFilter::All,
        "custom" => {
            let raw = query
                .custom_date
                .as_deref()
                .ok_or_else(|| AppError::validation("customDate is required with dateFilter=custom"))?;
            DateFilter::Custom(parse_date(raw)?)
        }
        other => {
            return Err(AppError::validation(format!(
                "unknown dateFilter: {}",
                other
            )));
        }
    };

    let type_filter = match query.type_filter.as_deref().unwrap_or("all") {
        "all" => TypeFilter::All,
        "Delivery" => TypeFilter::Only(OrderType::Delivery),
        "No Restaurante" => TypeFilter::Only(OrderType::NoRestaurante),
        other => {
            return Err(AppError::validation(format!(
                "unknown typeFilter: {}",
                other
            )));
        }
    };

    let orders = OrderRepository::new(state.get_db())
        .find_all(&current_user.tenant)
        .await?;
    let columns = derive_columns(
        &orders,
        date_filter,
        type_filter,
        &default_columns(),
        today_local(),
    );
    Ok(Json(columns))
}
