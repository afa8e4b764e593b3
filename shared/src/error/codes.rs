//! Unified error codes for the recipe service
//!
//! This module defines all error codes used across the server and clients.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: User account errors
//! - 3xxx: Recipe errors
//! - 4xxx: Tag errors
//! - 5xxx: File upload errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// HTTP verb not wired for this endpoint
    MethodNotAllowed = 8,

    // ==================== 1xxx: Auth ====================
    /// Request carries no usable credentials
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token is unknown or malformed
    TokenInvalid = 1003,
    /// Account is disabled
    AccountDisabled = 1004,

    // ==================== 2xxx: User ====================
    /// Email already registered
    EmailTaken = 2001,
    /// Email is empty or malformed
    InvalidEmail = 2002,
    /// Password under minimum length
    PasswordTooShort = 2003,
    /// Name is empty
    NameRequired = 2004,

    // ==================== 3xxx: Recipe ====================
    /// Recipe absent or owned by another user
    RecipeNotFound = 3001,
    /// Price is not a valid two decimal place amount
    InvalidPrice = 3002,
    /// `tags` query parameter contains a non-numeric token
    InvalidTagFilter = 3003,

    // ==================== 4xxx: Tag ====================
    /// Tag absent or owned by another user
    TagNotFound = 4001,

    // ==================== 5xxx: File Upload ====================
    /// No file provided in request
    NoFileProvided = 5001,
    /// Empty file provided
    EmptyFile = 5002,
    /// File too large
    FileTooLarge = 5003,
    /// Invalid/corrupted image file
    InvalidImageFile = 5004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// File system error
    IoError = 9003,
    /// Configuration error
    ConfigError = 9004,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::MethodNotAllowed => "Method not allowed",

            // Auth
            ErrorCode::NotAuthenticated => "Authentication credentials were not provided",
            ErrorCode::InvalidCredentials => "Unable to authenticate with provided credentials",
            ErrorCode::TokenInvalid => "Invalid token",
            ErrorCode::AccountDisabled => "User account is disabled",

            // User
            ErrorCode::EmailTaken => "A user with that email already exists",
            ErrorCode::InvalidEmail => "Enter a valid email address",
            ErrorCode::PasswordTooShort => "Password must be at least 5 characters",
            ErrorCode::NameRequired => "Name must not be empty",

            // Recipe
            ErrorCode::RecipeNotFound => "Recipe not found",
            ErrorCode::InvalidPrice => "Price must be a decimal with at most two decimal places",
            ErrorCode::InvalidTagFilter => {
                "Tag filter must be a comma-separated list of integer IDs"
            }

            // Tag
            ErrorCode::TagNotFound => "Tag not found",

            // File Upload
            ErrorCode::NoFileProvided => "No file provided",
            ErrorCode::EmptyFile => "Empty file provided",
            ErrorCode::FileTooLarge => "File too large",
            ErrorCode::InvalidImageFile => "Invalid image file",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::IoError => "File system error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::MethodNotAllowed),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenInvalid),
            1004 => Ok(ErrorCode::AccountDisabled),

            // User
            2001 => Ok(ErrorCode::EmailTaken),
            2002 => Ok(ErrorCode::InvalidEmail),
            2003 => Ok(ErrorCode::PasswordTooShort),
            2004 => Ok(ErrorCode::NameRequired),

            // Recipe
            3001 => Ok(ErrorCode::RecipeNotFound),
            3002 => Ok(ErrorCode::InvalidPrice),
            3003 => Ok(ErrorCode::InvalidTagFilter),

            // Tag
            4001 => Ok(ErrorCode::TagNotFound),

            // File Upload
            5001 => Ok(ErrorCode::NoFileProvided),
            5002 => Ok(ErrorCode::EmptyFile),
            5003 => Ok(ErrorCode::FileTooLarge),
            5004 => Ok(ErrorCode::InvalidImageFile),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::IoError),
            9004 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        // General
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::Unknown.code(), 1);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::AlreadyExists.code(), 4);
        assert_eq!(ErrorCode::InvalidRequest.code(), 5);
        assert_eq!(ErrorCode::InvalidFormat.code(), 6);
        assert_eq!(ErrorCode::RequiredField.code(), 7);
        assert_eq!(ErrorCode::MethodNotAllowed.code(), 8);

        // Auth
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::InvalidCredentials.code(), 1002);
        assert_eq!(ErrorCode::TokenInvalid.code(), 1003);
        assert_eq!(ErrorCode::AccountDisabled.code(), 1004);

        // User
        assert_eq!(ErrorCode::EmailTaken.code(), 2001);
        assert_eq!(ErrorCode::InvalidEmail.code(), 2002);
        assert_eq!(ErrorCode::PasswordTooShort.code(), 2003);
        assert_eq!(ErrorCode::NameRequired.code(), 2004);

        // Recipe
        assert_eq!(ErrorCode::RecipeNotFound.code(), 3001);
        assert_eq!(ErrorCode::InvalidPrice.code(), 3002);
        assert_eq!(ErrorCode::InvalidTagFilter.code(), 3003);

        // Tag
        assert_eq!(ErrorCode::TagNotFound.code(), 4001);

        // File Upload
        assert_eq!(ErrorCode::NoFileProvided.code(), 5001);
        assert_eq!(ErrorCode::EmptyFile.code(), 5002);
        assert_eq!(ErrorCode::FileTooLarge.code(), 5003);
        assert_eq!(ErrorCode::InvalidImageFile.code(), 5004);

        // System
        assert_eq!(ErrorCode::InternalError.code(), 9001);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
        assert_eq!(ErrorCode::IoError.code(), 9003);
        assert_eq!(ErrorCode::ConfigError.code(), 9004);
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(0), Ok(ErrorCode::Success));
        assert_eq!(ErrorCode::try_from(1001), Ok(ErrorCode::NotAuthenticated));
        assert_eq!(ErrorCode::try_from(2001), Ok(ErrorCode::EmailTaken));
        assert_eq!(ErrorCode::try_from(3001), Ok(ErrorCode::RecipeNotFound));
        assert_eq!(ErrorCode::try_from(4001), Ok(ErrorCode::TagNotFound));
        assert_eq!(ErrorCode::try_from(5004), Ok(ErrorCode::InvalidImageFile));
        assert_eq!(ErrorCode::try_from(9001), Ok(ErrorCode::InternalError));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
        assert_eq!(ErrorCode::try_from(1234), Err(InvalidErrorCode(1234)));
    }

    #[test]
    fn test_from_error_code_to_u16() {
        let code: u16 = ErrorCode::Success.into();
        assert_eq!(code, 0);

        let code: u16 = ErrorCode::NotAuthenticated.into();
        assert_eq!(code, 1001);

        let code: u16 = ErrorCode::InternalError.into();
        assert_eq!(code, 9001);
    }

    #[test]
    fn test_serialize() {
        let code = ErrorCode::NotFound;
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "3");

        let code = ErrorCode::RecipeNotFound;
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "3001");

        let code = ErrorCode::Success;
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "0");
    }

    #[test]
    fn test_deserialize() {
        let code: ErrorCode = serde_json::from_str("0").unwrap();
        assert_eq!(code, ErrorCode::Success);

        let code: ErrorCode = serde_json::from_str("3").unwrap();
        assert_eq!(code, ErrorCode::NotFound);

        let code: ErrorCode = serde_json::from_str("3001").unwrap();
        assert_eq!(code, ErrorCode::RecipeNotFound);

        let code: ErrorCode = serde_json::from_str("9001").unwrap();
        assert_eq!(code, ErrorCode::InternalError);
    }

    #[test]
    fn test_deserialize_invalid() {
        let result: Result<ErrorCode, _> = serde_json::from_str("999");
        assert!(result.is_err());

        let result: Result<ErrorCode, _> = serde_json::from_str("10000");
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::Success), "0");
        assert_eq!(format!("{}", ErrorCode::NotFound), "3");
        assert_eq!(format!("{}", ErrorCode::RecipeNotFound), "3001");
        assert_eq!(format!("{}", ErrorCode::InternalError), "9001");
    }

    #[test]
    fn test_message() {
        assert_eq!(
            ErrorCode::Success.message(),
            "Operation completed successfully"
        );
        assert_eq!(ErrorCode::RecipeNotFound.message(), "Recipe not found");
        assert_eq!(
            ErrorCode::PasswordTooShort.message(),
            "Password must be at least 5 characters"
        );
        assert_eq!(ErrorCode::InternalError.message(), "Internal server error");
    }

    #[test]
    fn test_invalid_error_code_display() {
        let err = InvalidErrorCode(999);
        assert_eq!(format!("{}", err), "invalid error code: 999");
    }

    #[test]
    fn test_roundtrip() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::NotAuthenticated,
            ErrorCode::EmailTaken,
            ErrorCode::RecipeNotFound,
            ErrorCode::InternalError,
        ];

        for code in codes {
            let json = serde_json::to_string(&code).unwrap();
            let parsed: ErrorCode = serde_json::from_str(&json).unwrap();
            assert_eq!(code, parsed);
        }
    }

    #[test]
    fn test_debug() {
        let debug_str = format!("{:?}", ErrorCode::Success);
        assert_eq!(debug_str, "Success");

        let debug_str = format!("{:?}", ErrorCode::RecipeNotFound);
        assert_eq!(debug_str, "RecipeNotFound");
    }

    #[test]
    fn test_hash() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(ErrorCode::Success);
        set.insert(ErrorCode::NotFound);
        set.insert(ErrorCode::Success); // Duplicate

        assert_eq!(set.len(), 2);
        assert!(set.contains(&ErrorCode::Success));
        assert!(set.contains(&ErrorCode::NotFound));
    }
}
