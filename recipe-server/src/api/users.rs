//! User account endpoints
//!
//! Registration and token exchange are public. Profile endpoints operate on
//! the user resolved by the bearer token middleware.

use axum::extract::State;
use axum::{Extension, Json};
use http::StatusCode;
use shared::error::{AppError, ErrorCode};
use shared::models::{TokenRequest, TokenResponse, UserCreate, UserPublic, UserReplace, UserUpdate};
use shared::util::{is_valid_email, normalize_email, now_millis};
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::db;
use crate::state::AppState;
use crate::util::{hash_password, verify_password};

use super::{ApiJson, ApiResult, db_error};

/// Minimum accepted password length, in characters
const MIN_PASSWORD_LEN: usize = 5;

/// Normalize and shape-check an email address
fn check_email(raw: &str) -> Result<String, AppError> {
    let email = normalize_email(raw);
    if !is_valid_email(&email) {
        return Err(AppError::new(ErrorCode::InvalidEmail).with_detail("field", "email"));
    }
    Ok(email)
}

fn check_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(
            AppError::new(ErrorCode::PasswordTooShort).with_detail("min_length", MIN_PASSWORD_LEN)
        );
    }
    Ok(())
}

fn check_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::new(ErrorCode::NameRequired).with_detail("field", "name"));
    }
    Ok(())
}

/// Reject an email already registered to a different user
async fn check_email_free(
    state: &AppState,
    email: &str,
    current_user_id: Option<i64>,
) -> Result<(), AppError> {
    let existing = db::users::find_by_email(&state.pool, email)
        .await
        .map_err(db_error)?;
    match existing {
        Some(user) if Some(user.id) != current_user_id => {
            Err(AppError::new(ErrorCode::EmailTaken).with_detail("field", "email"))
        }
        _ => Ok(()),
    }
}

/// POST /users/create/
pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<UserCreate>,
) -> Result<(StatusCode, Json<UserPublic>), AppError> {
    let email = check_email(&req.email)?;
    check_password(&req.password)?;
    check_name(&req.name)?;
    check_email_free(&state, &email, None).await?;

    let password_hash =
        hash_password(&req.password).map_err(|_| AppError::new(ErrorCode::InternalError))?;
    let user_id = db::users::create(&state.pool, &email, &password_hash, &req.name, now_millis())
        .await
        .map_err(|e| {
            if e.as_database_error().is_some_and(|d| d.is_unique_violation()) {
                AppError::new(ErrorCode::EmailTaken).with_detail("field", "email")
            } else {
                db_error(e)
            }
        })?;

    tracing::info!(user_id, email = %email, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(UserPublic {
            email,
            name: req.name,
        }),
    ))
}

/// POST /users/token/
///
/// Exchanges credentials for an API token. Repeated logins return the
/// token issued on the first exchange.
pub async fn token(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<TokenRequest>,
) -> ApiResult<TokenResponse> {
    let email = normalize_email(&req.email);
    let user = db::users::find_by_email(&state.pool, &email)
        .await
        .map_err(db_error)?
        .ok_or_else(AppError::invalid_credentials)?;

    if !verify_password(&req.password, &user.password_hash) {
        return Err(AppError::invalid_credentials());
    }
    // Disabled accounts fail the exchange the same way bad passwords do
    if !user.is_active {
        return Err(AppError::invalid_credentials());
    }

    let token = match db::tokens::find_for_user(&state.pool, user.id)
        .await
        .map_err(db_error)?
    {
        Some(existing) => existing,
        None => {
            let candidate = Uuid::new_v4().to_string();
            db::tokens::get_or_create(&state.pool, &candidate, user.id, now_millis())
                .await
                .map_err(db_error)?
        }
    };

    Ok(Json(TokenResponse { token }))
}

/// GET /users/me/
pub async fn me(Extension(user): Extension<CurrentUser>) -> ApiResult<UserPublic> {
    Ok(Json(UserPublic {
        email: user.email,
        name: user.name,
    }))
}

/// PUT /users/me/
pub async fn replace_me(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ApiJson(req): ApiJson<UserReplace>,
) -> ApiResult<UserPublic> {
    let email = check_email(&req.email)?;
    check_email_free(&state, &email, Some(user.id)).await?;
    check_name(&req.name)?;
    let password_hash = match &req.password {
        Some(password) => {
            check_password(password)?;
            Some(hash_password(password).map_err(|_| AppError::new(ErrorCode::InternalError))?)
        }
        None => None,
    };

    apply_profile_update(
        &state,
        user.id,
        Some(&email),
        Some(&req.name),
        password_hash.as_deref(),
    )
    .await
}

/// PATCH /users/me/
pub async fn update_me(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ApiJson(req): ApiJson<UserUpdate>,
) -> ApiResult<UserPublic> {
    let email = match &req.email {
        Some(raw) => {
            let email = check_email(raw)?;
            check_email_free(&state, &email, Some(user.id)).await?;
            Some(email)
        }
        None => None,
    };
    if let Some(name) = &req.name {
        check_name(name)?;
    }
    let password_hash = match &req.password {
        Some(password) => {
            check_password(password)?;
            Some(hash_password(password).map_err(|_| AppError::new(ErrorCode::InternalError))?)
        }
        None => None,
    };

    apply_profile_update(
        &state,
        user.id,
        email.as_deref(),
        req.name.as_deref(),
        password_hash.as_deref(),
    )
    .await
}

async fn apply_profile_update(
    state: &AppState,
    user_id: i64,
    email: Option<&str>,
    name: Option<&str>,
    password_hash: Option<&str>,
) -> ApiResult<UserPublic> {
    db::users::update_profile(&state.pool, user_id, email, name, password_hash)
        .await
        .map_err(|e| {
            if e.as_database_error().is_some_and(|d| d.is_unique_violation()) {
                AppError::new(ErrorCode::EmailTaken).with_detail("field", "email")
            } else {
                db_error(e)
            }
        })?;

    let updated = db::users::find_by_id(&state.pool, user_id)
        .await
        .map_err(db_error)?
        .ok_or_else(|| AppError::not_found("User"))?;

    Ok(Json(UserPublic {
        email: updated.email,
        name: updated.name,
    }))
}
