//! Order routes.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use super::auth::RequireAuth;
use super::{AppError, AppState, Result};
use crate::domain::{LineItemDetail, Order, OrderView, PlaceOrder};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_orders).post(place_order))
        .route("/orders/{id}", get(get_order).put(update_status).delete(delete_order))
}

#[derive(Debug, Deserialize)]
struct StatusUpdate {
    status: Option<String>,
}

#[instrument(skip(state))]
async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<OrderView<String>>>> {
    Ok(Json(state.orders.list_orders().await?))
}

#[instrument(skip(state))]
async fn get_order(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<OrderView<LineItemDetail>>> {
    Ok(Json(state.orders.get_order(id).await?))
}

#[instrument(skip(state, identity, payload), fields(user_id = %identity.user_id))]
async fn place_order(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
    payload: std::result::Result<Json<PlaceOrder>, JsonRejection>,
) -> Result<Json<Order>> {
    let Json(request) = payload?;
    Ok(Json(state.orders.place_order(&identity.user_id, request).await?))
}

#[instrument(skip(state, payload))]
async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<StatusUpdate>, JsonRejection>,
) -> Result<Json<Order>> {
    let Json(update) = payload?;
    let status = update
        .status
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Status is required".to_string()))?;
    Ok(Json(state.orders.set_order_status(id, status).await?))
}

#[instrument(skip(state))]
async fn delete_order(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Order>> {
    Ok(Json(state.orders.delete_order(id).await?))
}
