//! Error category helpers
//!
//! Groups error codes into broad categories based on their numeric range.

use super::codes::ErrorCode;

/// Broad error category derived from the numeric code range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// 0xxx: General errors
    General,
    /// 1xxx: Authentication errors
    Auth,
    /// 2xxx: User account errors
    User,
    /// 3xxx: Recipe errors
    Recipe,
    /// 4xxx: Tag errors
    Tag,
    /// 5xxx: File upload errors
    Upload,
    /// 9xxx: System errors
    System,
}

impl ErrorCategory {
    /// Determine the category from a numeric error code
    pub const fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::User,
            3000..4000 => Self::Recipe,
            4000..5000 => Self::Tag,
            5000..6000 => Self::Upload,
            _ => Self::System,
        }
    }

    /// Human-readable category name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Auth => "Auth",
            Self::User => "User",
            Self::Recipe => "Recipe",
            Self::Tag => "Tag",
            Self::Upload => "Upload",
            Self::System => "System",
        }
    }
}

impl ErrorCode {
    /// Get the category of this error code
    pub const fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::User);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Recipe);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Tag);
        assert_eq!(ErrorCategory::from_code(5001), ErrorCategory::Upload);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::Success.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::NotAuthenticated.category(), ErrorCategory::Auth);
        assert_eq!(ErrorCode::EmailTaken.category(), ErrorCategory::User);
        assert_eq!(ErrorCode::RecipeNotFound.category(), ErrorCategory::Recipe);
        assert_eq!(ErrorCode::TagNotFound.category(), ErrorCategory::Tag);
        assert_eq!(ErrorCode::FileTooLarge.category(), ErrorCategory::Upload);
        assert_eq!(ErrorCode::InternalError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_name() {
        assert_eq!(ErrorCategory::General.name(), "General");
        assert_eq!(ErrorCategory::Auth.name(), "Auth");
        assert_eq!(ErrorCategory::User.name(), "User");
        assert_eq!(ErrorCategory::Recipe.name(), "Recipe");
        assert_eq!(ErrorCategory::Tag.name(), "Tag");
        assert_eq!(ErrorCategory::Upload.name(), "Upload");
        assert_eq!(ErrorCategory::System.name(), "System");
    }
}
