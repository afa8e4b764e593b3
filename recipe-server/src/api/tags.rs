//! Tag endpoints
//!
//! Tags are owner-scoped labels. New tags come into existence through recipe
//! writes; this surface lists, renames, and deletes them.

use axum::extract::State;
use axum::{Extension, Json};
use http::StatusCode;
use shared::error::{AppError, ErrorCode};
use shared::models::{Tag, TagCreate, TagUpdate};

use crate::auth::CurrentUser;
use crate::db;
use crate::state::AppState;

use super::{ApiJson, ApiPath, ApiResult, db_error};

fn check_tag_name(name: &str) -> Result<&str, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Tag name must not be empty").with_detail("field", "name"));
    }
    Ok(name)
}

fn map_rename_error(e: sqlx::Error) -> AppError {
    if e.as_database_error().is_some_and(|d| d.is_unique_violation()) {
        AppError::already_exists("Tag")
    } else {
        db_error(e)
    }
}

/// GET /tags/
///
/// Tags owned by the user, ordered by name descending.
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Vec<Tag>> {
    let tags = db::tags::list_for_user(&state.pool, user.id)
        .await
        .map_err(db_error)?;
    Ok(Json(tags))
}

/// PUT /tags/{id}/
pub async fn replace(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<TagCreate>,
) -> ApiResult<Tag> {
    let name = check_tag_name(&req.name)?;
    rename(&state, &user, id, name).await
}

/// PATCH /tags/{id}/
///
/// Renames when a name is supplied; otherwise returns the tag unchanged.
pub async fn partial_update(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<TagUpdate>,
) -> ApiResult<Tag> {
    match &req.name {
        Some(raw) => {
            let name = check_tag_name(raw)?;
            rename(&state, &user, id, name).await
        }
        None => {
            let tag = db::tags::find_for_user(&state.pool, user.id, id)
                .await
                .map_err(db_error)?
                .ok_or_else(|| AppError::new(ErrorCode::TagNotFound))?;
            Ok(Json(tag))
        }
    }
}

/// DELETE /tags/{id}/
///
/// Removes the tag together with its recipe associations.
pub async fn destroy(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, AppError> {
    let deleted = db::tags::delete(&state.pool, user.id, id)
        .await
        .map_err(db_error)?;
    if deleted == 0 {
        return Err(AppError::new(ErrorCode::TagNotFound));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn rename(state: &AppState, user: &CurrentUser, id: i64, name: &str) -> ApiResult<Tag> {
    let updated = db::tags::update_name(&state.pool, user.id, id, name)
        .await
        .map_err(map_rename_error)?;
    if updated == 0 {
        return Err(AppError::new(ErrorCode::TagNotFound));
    }

    let tag = db::tags::find_for_user(&state.pool, user.id, id)
        .await
        .map_err(db_error)?
        .ok_or_else(|| AppError::new(ErrorCode::TagNotFound))?;
    Ok(Json(tag))
}
