//! Serving of uploaded recipe images from the media directory

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use http::header;
use shared::error::AppError;

use crate::state::AppState;

/// Content type by file extension; uploads only ever produce these three
fn content_type_for(filename: &str) -> &'static str {
    match std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

/// GET /media/uploads/recipe/{filename}
///
/// Image download, served without authentication.
pub async fn serve_recipe_image(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    // Path parameters arrive percent-decoded; refuse anything that could
    // escape the media directory
    if filename.is_empty()
        || filename.contains("..")
        || filename.contains('/')
        || filename.contains('\\')
    {
        return Err(AppError::invalid_request("Invalid filename"));
    }

    let path = state
        .media_root
        .join("uploads")
        .join("recipe")
        .join(&filename);
    match tokio::fs::read(&path).await {
        Ok(content) => {
            Ok(([(header::CONTENT_TYPE, content_type_for(&filename))], content).into_response())
        }
        Err(_) => Err(AppError::not_found("File")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_for_known_extensions() {
        assert_eq!(content_type_for("a.png"), "image/png");
        assert_eq!(content_type_for("a.jpg"), "image/jpeg");
        assert_eq!(content_type_for("a.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("a.webp"), "image/webp");
    }

    #[test]
    fn test_content_type_for_unknown_extension() {
        assert_eq!(content_type_for("a.bin"), "application/octet-stream");
        assert_eq!(content_type_for("noext"), "application/octet-stream");
    }
}
