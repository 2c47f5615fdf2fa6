//! User registration, lookup and login routes.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{AppError, AppState, Result};
use crate::domain::{RegisterUser, User};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(register_user))
        .route("/users/login", post(login))
        .route("/users/{id}", get(get_user))
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    user: String,
    token: String,
}

#[instrument(skip(state))]
async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    Ok(Json(state.users.list_users().await?))
}

#[instrument(skip(state))]
async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<User>> {
    state
        .users
        .get_user(id.clone())
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("User not found: {id}")))
}

#[instrument(skip(state, payload))]
async fn register_user(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RegisterUser>, JsonRejection>,
) -> Result<Json<User>> {
    let Json(request) = payload?;
    Ok(Json(state.users.register_user(request).await?))
}

#[instrument(skip(state, payload))]
async fn login(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>> {
    let Json(request) = payload?;
    let user = state.users.authenticate(&request.email, &request.password).await?;
    let token = state
        .tokens
        .issue(&user.id)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(Json(LoginResponse { user: user.name, token }))
}
