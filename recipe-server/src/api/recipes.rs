//! Recipe endpoints
//!
//! All operations are scoped to the authenticated owner. List rows carry the
//! summary shape; single-recipe responses carry the detail shape with
//! description and image. Writes that touch tags run inside a transaction so
//! a failed tag resolution leaves no half-written recipe behind.

use std::collections::HashMap;

use axum::extract::{Multipart, Query, State};
use axum::{Extension, Json};
use http::StatusCode;
use image::ImageFormat;
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    RecipeCreate, RecipeDetail, RecipeImageRef, RecipeReplace, RecipeSummary, RecipeUpdate, Tag,
    TagCreate,
};
use shared::util::now_millis;
use sqlx::SqliteConnection;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::db;
use crate::db::recipes::RecipeRow;
use crate::state::AppState;

use super::{ApiJson, ApiPath, ApiResult, db_error};

/// Maximum upload size (5MB)
pub(super) const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;

/// Prices carry at most five digits, two of them decimals
const MAX_PRICE_MANTISSA: i128 = 100_000;

#[derive(Deserialize)]
pub struct ListQuery {
    tags: Option<String>,
}

/// Parse the `tags` query parameter, a comma separated list of tag ids.
/// Absent or empty means no filter.
fn parse_tag_filter(raw: Option<&str>) -> Result<Option<Vec<i64>>, AppError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    if raw.is_empty() {
        return Ok(None);
    }

    let mut ids = Vec::new();
    for token in raw.split(',') {
        let id = token.trim().parse::<i64>().map_err(|_| {
            AppError::with_message(
                ErrorCode::InvalidTagFilter,
                format!("Invalid tag id: {token:?}"),
            )
        })?;
        ids.push(id);
    }
    Ok(Some(ids))
}

/// Validate a wire price and return the canonical two-decimal form stored in
/// the database.
fn canonical_price(price: Decimal) -> Result<String, AppError> {
    if price.scale() > 2 {
        return Err(AppError::with_message(
            ErrorCode::InvalidPrice,
            "Price allows at most 2 decimal places",
        )
        .with_detail("field", "price"));
    }
    let mut price = price;
    price.rescale(2);
    if price.mantissa().abs() >= MAX_PRICE_MANTISSA {
        return Err(AppError::with_message(
            ErrorCode::InvalidPrice,
            "Price allows at most 5 digits in total",
        )
        .with_detail("field", "price"));
    }
    Ok(price.to_string())
}

fn check_title(title: &str) -> Result<&str, AppError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::validation("Title must not be empty").with_detail("field", "title"));
    }
    Ok(title)
}

fn parse_price_column(price: &str) -> Result<Decimal, AppError> {
    price.parse::<Decimal>().map_err(|e| {
        tracing::error!("Stored price failed to parse: {e}");
        AppError::internal("Stored price is corrupt")
    })
}

fn to_summary(row: RecipeRow, tags: Vec<Tag>) -> Result<RecipeSummary, AppError> {
    Ok(RecipeSummary {
        id: row.id,
        title: row.title,
        time_minutes: row.time_minutes,
        price: parse_price_column(&row.price)?,
        link: row.link,
        tags,
    })
}

fn to_detail(row: RecipeRow, tags: Vec<Tag>) -> Result<RecipeDetail, AppError> {
    Ok(RecipeDetail {
        id: row.id,
        title: row.title,
        time_minutes: row.time_minutes,
        price: parse_price_column(&row.price)?,
        link: row.link,
        tags,
        description: row.description,
        image: row.image,
    })
}

/// Resolve nested tag payloads to owned tag ids, creating missing tags
async fn resolve_tags(
    conn: &mut SqliteConnection,
    user_id: i64,
    inputs: &[TagCreate],
    now: i64,
) -> Result<Vec<i64>, AppError> {
    let mut ids = Vec::with_capacity(inputs.len());
    for input in inputs {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(
                AppError::validation("Tag name must not be empty").with_detail("field", "tags")
            );
        }
        let tag = db::tags::get_or_create(&mut *conn, user_id, name, now)
            .await
            .map_err(db_error)?;
        ids.push(tag.id);
    }
    Ok(ids)
}

async fn load_detail(state: &AppState, user_id: i64, id: i64) -> Result<RecipeDetail, AppError> {
    let row = db::recipes::find_for_user(&state.pool, user_id, id)
        .await
        .map_err(db_error)?
        .ok_or_else(|| AppError::new(ErrorCode::RecipeNotFound))?;
    let tags = db::tags::list_for_recipe(&state.pool, id)
        .await
        .map_err(db_error)?;
    to_detail(row, tags)
}

/// GET /recipes/
///
/// Recipes owned by the user, newest first.
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<RecipeSummary>> {
    let tag_ids = parse_tag_filter(query.tags.as_deref())?;
    let rows = db::recipes::list_for_user(&state.pool, user.id, tag_ids.as_deref())
        .await
        .map_err(db_error)?;

    // One query for every tag association, grouped in memory
    let mut tags_by_recipe: HashMap<i64, Vec<Tag>> = HashMap::new();
    let associations = db::tags::list_for_owner_recipes(&state.pool, user.id)
        .await
        .map_err(db_error)?;
    for assoc in associations {
        tags_by_recipe.entry(assoc.recipe_id).or_default().push(Tag {
            id: assoc.id,
            name: assoc.name,
        });
    }

    let mut summaries = Vec::with_capacity(rows.len());
    for row in rows {
        let tags = tags_by_recipe.remove(&row.id).unwrap_or_default();
        summaries.push(to_summary(row, tags)?);
    }
    Ok(Json(summaries))
}

/// POST /recipes/
///
/// Creates the recipe and any tags named in the payload that do not
/// exist yet.
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ApiJson(req): ApiJson<RecipeCreate>,
) -> Result<(StatusCode, Json<RecipeDetail>), AppError> {
    let title = check_title(&req.title)?.to_string();
    let price = canonical_price(req.price)?;
    let now = now_millis();

    let mut tx = state.pool.begin().await.map_err(db_error)?;
    let recipe_id = db::recipes::create(
        &mut tx,
        user.id,
        &title,
        req.time_minutes,
        &price,
        &req.description,
        &req.link,
        now,
    )
    .await
    .map_err(db_error)?;

    if let Some(inputs) = &req.tags {
        let tag_ids = resolve_tags(&mut tx, user.id, inputs, now).await?;
        db::recipes::set_tags(&mut tx, recipe_id, &tag_ids)
            .await
            .map_err(db_error)?;
    }
    tx.commit().await.map_err(db_error)?;

    tracing::info!(recipe_id, user_id = user.id, "Recipe created");

    let detail = load_detail(&state, user.id, recipe_id).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// GET /recipes/{id}/
pub async fn retrieve(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<RecipeDetail> {
    let detail = load_detail(&state, user.id, id).await?;
    Ok(Json(detail))
}

/// PUT /recipes/{id}/
pub async fn replace(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<RecipeReplace>,
) -> ApiResult<RecipeDetail> {
    let title = check_title(&req.title)?.to_string();
    let price = canonical_price(req.price)?;

    apply_update(
        &state,
        &user,
        id,
        Some(title),
        Some(req.time_minutes),
        Some(price),
        req.description,
        req.link,
        req.tags,
    )
    .await
}

/// PATCH /recipes/{id}/
pub async fn partial_update(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<RecipeUpdate>,
) -> ApiResult<RecipeDetail> {
    let title = match &req.title {
        Some(raw) => Some(check_title(raw)?.to_string()),
        None => None,
    };
    let price = match req.price {
        Some(p) => Some(canonical_price(p)?),
        None => None,
    };

    apply_update(
        &state,
        &user,
        id,
        title,
        req.time_minutes,
        price,
        req.description,
        req.link,
        req.tags,
    )
    .await
}

#[allow(clippy::too_many_arguments)]
async fn apply_update(
    state: &AppState,
    user: &CurrentUser,
    id: i64,
    title: Option<String>,
    time_minutes: Option<i64>,
    price: Option<String>,
    description: Option<String>,
    link: Option<String>,
    tags: Option<Vec<TagCreate>>,
) -> ApiResult<RecipeDetail> {
    let now = now_millis();

    let mut tx = state.pool.begin().await.map_err(db_error)?;
    let updated = db::recipes::update(
        &mut tx,
        user.id,
        id,
        title.as_deref(),
        time_minutes,
        price.as_deref(),
        description.as_deref(),
        link.as_deref(),
    )
    .await
    .map_err(db_error)?;
    if updated == 0 {
        return Err(AppError::new(ErrorCode::RecipeNotFound));
    }

    if let Some(inputs) = &tags {
        let tag_ids = resolve_tags(&mut tx, user.id, inputs, now).await?;
        db::recipes::set_tags(&mut tx, id, &tag_ids)
            .await
            .map_err(db_error)?;
    }
    tx.commit().await.map_err(db_error)?;

    let detail = load_detail(state, user.id, id).await?;
    Ok(Json(detail))
}

/// DELETE /recipes/{id}/
pub async fn destroy(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, AppError> {
    let deleted = db::recipes::delete(&state.pool, user.id, id)
        .await
        .map_err(db_error)?;
    if deleted == 0 {
        return Err(AppError::new(ErrorCode::RecipeNotFound));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /recipes/{id}/upload-image/
///
/// Attaches an image to the recipe, replacing any previous one.
pub async fn upload_image(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ApiPath(id): ApiPath<i64>,
    mut multipart: Multipart,
) -> ApiResult<RecipeImageRef> {
    // Ownership check before reading the body
    db::recipes::find_for_user(&state.pool, user.id, id)
        .await
        .map_err(db_error)?
        .ok_or_else(|| AppError::new(ErrorCode::RecipeNotFound))?;

    let mut file_data: Option<Vec<u8>> = None;
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::with_message(ErrorCode::InvalidRequest, format!("Multipart error: {e}"))
    })? {
        if field.name() == Some("image") {
            file_data = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| {
                        AppError::with_message(
                            ErrorCode::InvalidRequest,
                            format!("Read error: {e}"),
                        )
                    })?
                    .to_vec(),
            );
            break;
        }
    }

    let data = file_data.ok_or_else(|| AppError::new(ErrorCode::NoFileProvided))?;
    if data.is_empty() {
        return Err(AppError::new(ErrorCode::EmptyFile));
    }
    if data.len() > MAX_IMAGE_SIZE {
        return Err(AppError::with_message(
            ErrorCode::FileTooLarge,
            format!("File too large: {} bytes (max {})", data.len(), MAX_IMAGE_SIZE),
        ));
    }

    let ext = match image::guess_format(&data) {
        Ok(ImageFormat::Png) => "png",
        Ok(ImageFormat::Jpeg) => "jpg",
        Ok(ImageFormat::WebP) => "webp",
        _ => return Err(AppError::new(ErrorCode::InvalidImageFile)),
    };
    // Decode fully so truncated files are refused up front
    image::load_from_memory(&data).map_err(|e| {
        AppError::with_message(ErrorCode::InvalidImageFile, format!("Invalid image: {e}"))
    })?;

    let filename = format!("{}.{ext}", Uuid::new_v4());
    let dir = state.media_root.join("uploads").join("recipe");
    tokio::fs::create_dir_all(&dir).await.map_err(|e| {
        tracing::error!("Failed to create media directory: {e}");
        AppError::new(ErrorCode::IoError)
    })?;
    tokio::fs::write(dir.join(&filename), &data)
        .await
        .map_err(|e| {
            tracing::error!("Failed to save image: {e}");
            AppError::new(ErrorCode::IoError)
        })?;

    let image_url = format!("/media/uploads/recipe/{filename}");
    db::recipes::set_image(&state.pool, user.id, id, &image_url)
        .await
        .map_err(db_error)?;

    tracing::info!(
        recipe_id = id,
        filename = %filename,
        size = data.len(),
        "Recipe image uploaded"
    );

    Ok(Json(RecipeImageRef {
        id,
        image: Some(image_url),
    }))
}
