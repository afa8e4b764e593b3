//! Shared types for the recipe service
//!
//! Common types used by the server crate: the error system, wire models
//! for users, recipes and tags, and small utility functions.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, ErrorCode, ErrorResponse};
