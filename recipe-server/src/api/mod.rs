//! API routes for recipe-server

pub mod health;
pub mod media;
pub mod recipes;
pub mod tags;
pub mod users;

use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use axum::routing::{get, post};
use axum::{Router, middleware};
use serde::de::DeserializeOwned;
use shared::error::{AppError, ErrorCode};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::state::AppState;

pub type ApiResult<T> = Result<axum::Json<T>, AppError>;

fn db_error(e: impl std::fmt::Display) -> AppError {
    tracing::error!("Query error: {e}");
    AppError::database("Database operation failed")
}

/// JSON body extractor that reports deserialization problems through the
/// standard error envelope instead of axum's plain-text rejection.
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(match rejection {
                JsonRejection::JsonDataError(e) => {
                    AppError::with_message(ErrorCode::ValidationFailed, e.body_text())
                }
                other => AppError::with_message(ErrorCode::InvalidFormat, other.body_text()),
            }),
        }
    }
}

/// Path extractor that turns unparseable segments into a not-found envelope,
/// so `/recipes/abc/` behaves like a missing resource.
pub struct ApiPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Path::<T>::from_request_parts(parts, state).await {
            Ok(axum::extract::Path(value)) => Ok(Self(value)),
            Err(_) => Err(AppError::new(ErrorCode::NotFound)),
        }
    }
}

/// Explicit handler for verbs this surface deliberately leaves unwired
async fn method_not_allowed() -> AppError {
    AppError::method_not_allowed()
}

async fn not_found() -> AppError {
    AppError::new(ErrorCode::NotFound)
}

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // Image uploads need a larger body cap than axum's default; the extra
    // 64 KiB leaves room for the multipart framing around a full-size file
    let uploads = Router::new()
        .route("/recipes/{id}/upload-image/", post(recipes::upload_image))
        .layer(DefaultBodyLimit::max(recipes::MAX_IMAGE_SIZE + 64 * 1024));

    // Owner-scoped resources (token authenticated)
    let protected = Router::new()
        .route("/recipes/", get(recipes::list).post(recipes::create))
        .route(
            "/recipes/{id}/",
            get(recipes::retrieve)
                .put(recipes::replace)
                .patch(recipes::partial_update)
                .delete(recipes::destroy),
        )
        .merge(uploads)
        .route("/tags/", get(tags::list).post(method_not_allowed))
        .route(
            "/tags/{id}/",
            get(method_not_allowed)
                .put(tags::replace)
                .patch(tags::partial_update)
                .delete(tags::destroy),
        )
        .route(
            "/users/me/",
            get(users::me)
                .put(users::replace_me)
                .patch(users::update_me)
                .post(method_not_allowed),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // Registration and token exchange (no auth)
    let public = Router::new()
        .route("/users/create/", post(users::register))
        .route("/users/token/", post(users::token));

    Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/media/uploads/recipe/{filename}",
            get(media::serve_recipe_image),
        )
        .merge(public)
        .merge(protected)
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http::StatusCode;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_check() {
        let state = AppState::new_in_memory("media").await.unwrap();
        let app = create_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_path_returns_404() {
        let state = AppState::new_in_memory("media").await.unwrap();
        let app = create_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
