//! Bearer token extractor.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::debug;

use super::{AppError, AppState};

/// The verified identity of the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
}

/// Extractor that requires a valid bearer token.
///
/// A missing token is rejected with 401, a token that fails verification with 403.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAuth(identity): RequireAuth) -> String {
///     identity.user_id
/// }
/// ```
pub struct RequireAuth(pub Identity);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Unauthorized("Login first".to_string()))?;

        let claims = state.tokens.verify(token).map_err(|e| {
            debug!(error = %e, "Token rejected");
            AppError::Forbidden(e.to_string())
        })?;

        Ok(Self(Identity { user_id: claims.sub }))
    }
}
