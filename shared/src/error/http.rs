//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Map this error code to the HTTP status it is served with
    ///
    /// Validation and domain failures surface as 400 so the mapping
    /// defaults to `BAD_REQUEST` and only lists the exceptions.
    pub fn http_status(&self) -> StatusCode {
        match self {
            ErrorCode::Success => StatusCode::OK,

            ErrorCode::NotFound | ErrorCode::RecipeNotFound | ErrorCode::TagNotFound => {
                StatusCode::NOT_FOUND
            }

            ErrorCode::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,

            ErrorCode::NotAuthenticated
            | ErrorCode::TokenInvalid
            | ErrorCode::AccountDisabled => StatusCode::UNAUTHORIZED,

            ErrorCode::InternalError
            | ErrorCode::DatabaseError
            | ErrorCode::IoError
            | ErrorCode::ConfigError => StatusCode::INTERNAL_SERVER_ERROR,

            _ => StatusCode::BAD_REQUEST,
        }
    }
}
