//! Product catalog routes.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use tracing::{info, instrument};

use super::auth::{Identity, RequireAuth};
use super::{AppError, AppState, Result};
use crate::domain::{Product, ProductCreate, ProductPatch};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products/featured", get(list_featured))
        .route("/products/{id}", get(get_product).put(update_product).delete(delete_product))
        .route("/products/{id}/stock", put(set_stock))
}

#[derive(Debug, Deserialize)]
struct ProductQuery {
    /// Comma-separated category list.
    categories: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StockUpdate {
    count_in_stock: i64,
}

async fn require_admin(state: &AppState, identity: &Identity) -> Result<()> {
    if state.users.is_admin(identity.user_id.clone()).await? {
        Ok(())
    } else {
        Err(AppError::Forbidden("Admin access required".to_string()))
    }
}

#[instrument(skip(state))]
async fn list_products(State(state): State<AppState>, Query(query): Query<ProductQuery>) -> Result<Json<Vec<Product>>> {
    let categories: Option<Vec<&str>> = query
        .categories
        .as_deref()
        .map(|raw| raw.split(',').map(str::trim).filter(|c| !c.is_empty()).collect());
    Ok(Json(state.products.list_filtered(categories.as_deref()).await?))
}

#[instrument(skip(state))]
async fn list_featured(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    Ok(Json(state.products.list_featured().await?))
}

#[instrument(skip(state))]
async fn get_product(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Product>> {
    state
        .products
        .get_product(id.clone())
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Product not found: {id}")))
}

#[instrument(skip(state, identity, payload), fields(user_id = %identity.user_id))]
async fn create_product(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
    payload: std::result::Result<Json<ProductCreate>, JsonRejection>,
) -> Result<Json<Product>> {
    require_admin(&state, &identity).await?;
    let Json(params) = payload?;
    Ok(Json(state.products.create_product(params).await?))
}

#[instrument(skip(state, identity, payload), fields(user_id = %identity.user_id))]
async fn set_stock(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
    Path(id): Path<String>,
    payload: std::result::Result<Json<StockUpdate>, JsonRejection>,
) -> Result<Json<Product>> {
    require_admin(&state, &identity).await?;
    let Json(update) = payload?;
    if update.count_in_stock < 0 {
        return Err(AppError::BadRequest("Stock must not be negative".to_string()));
    }
    let product = state.products.set_stock(id, update.count_in_stock).await?;
    info!(product_id = %product.id, stock = product.count_in_stock, "Stock set by admin");
    Ok(Json(product))
}

#[instrument(skip(state, identity, payload), fields(user_id = %identity.user_id))]
async fn update_product(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
    Path(id): Path<String>,
    payload: std::result::Result<Json<ProductPatch>, JsonRejection>,
) -> Result<Json<Product>> {
    require_admin(&state, &identity).await?;
    let Json(patch) = payload?;
    Ok(Json(state.products.update_product(id, patch).await?))
}

/// Removes a product. Line items that reference it keep the id and show no product afterwards.
#[instrument(skip(state, identity), fields(user_id = %identity.user_id))]
async fn delete_product(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    require_admin(&state, &identity).await?;
    let product = state.products.delete_product(id).await?;
    info!(product_id = %product.id, "Product deleted by admin");
    Ok(Json(product))
}
