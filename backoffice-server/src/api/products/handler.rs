//! Product API handlers

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Product, ProductCreate, ProductUpdate};
use crate::db::repository::ProductRepository;
use crate::orders::StockService;
use crate::utils::{AppError, AppResult};

const RESOURCE: &str = "products";

fn product_id(product: &Product) -> String {
    product
        .id
        .as_ref()
        .map(|rid| rid.key().to_string())
        .unwrap_or_default()
}

#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    /// low | out - restrict to stock-alert products
    pub stock: Option<String>,
}

/// GET /api/products
pub async fn list(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Query(query): Query<ProductsQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let mut products = ProductRepository::new(state.get_db())
        .find_all(&current_user.tenant)
        .await?;

    match query.stock.as_deref() {
        None => {}
        Some("low") => products.retain(Product::is_low_stock),
        Some("out") => products.retain(Product::is_out_of_stock),
        Some(other) => {
            return Err(AppError::validation(format!(
                "unknown stock filter: {}",
                other
            )));
        }
    }

    Ok(Json(products))
}

/// GET /api/products/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let product = ProductRepository::new(state.get_db())
        .find_by_id(&current_user.tenant, &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {} not found", id)))?;
    Ok(Json(product))
}

/// POST /api/products
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    payload.validate()?;

    let product = ProductRepository::new(state.get_db())
        .create(&current_user.tenant, payload)
        .await?;

    state.broadcast_sync(RESOURCE, "created", &product_id(&product), Some(&product));
    Ok(Json(product))
}

/// PUT /api/products/:id
pub async fn update(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    let product = ProductRepository::new(state.get_db())
        .update(&current_user.tenant, &id, payload)
        .await?;

    state.broadcast_sync(RESOURCE, "updated", &id, Some(&product));
    Ok(Json(product))
}

/// POST /api/products/:id/toggle-status
pub async fn toggle_status(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let product = ProductRepository::new(state.get_db())
        .toggle_status(&current_user.tenant, &id)
        .await?;

    state.broadcast_sync(RESOURCE, "updated", &id, Some(&product));
    Ok(Json(product))
}

#[derive(Debug, Deserialize)]
pub struct ReplenishRequest {
    pub stock: Decimal,
}

/// PUT /api/products/:id/stock - absolute overwrite, not additive
pub async fn replenish_stock(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(req): Json<ReplenishRequest>,
) -> AppResult<Json<Product>> {
    let product = StockService::new(state.get_db())
        .replenish(&current_user.tenant, &id, req.stock)
        .await?;

    state.broadcast_sync(RESOURCE, "updated", &id, Some(&product));
    Ok(Json(product))
}

/// DELETE /api/products/:id
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    ProductRepository::new(state.get_db())
        .delete(&current_user.tenant, &id)
        .await?;
    state.broadcast_sync(RESOURCE, "deleted", &id, None::<&Product>);
    Ok(Json(serde_json::json!({ "deleted": id })))
}
