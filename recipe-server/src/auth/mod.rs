//! Opaque bearer token authentication
//!
//! Tokens are random strings handed out by the token endpoint and validated
//! by lookup on every request; nothing is encoded in the token itself.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::error::{AppError, ErrorCode};

use crate::db;
use crate::state::AppState;

/// Authenticated identity injected into request extensions
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub is_staff: bool,
}

/// Middleware resolving `Authorization: Bearer <token>` to a [`CurrentUser`]
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(AppError::not_authenticated)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(AppError::not_authenticated)?;

    let user = db::tokens::find_user(&state.pool, token)
        .await
        .map_err(|e| {
            tracing::error!("Token lookup error: {e}");
            AppError::database("Database operation failed")
        })?
        .ok_or_else(|| AppError::invalid_token("Invalid token"))?;

    if !user.is_active {
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    let identity = CurrentUser {
        id: user.id,
        email: user.email,
        name: user.name,
        is_staff: user.is_staff,
    };
    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}
