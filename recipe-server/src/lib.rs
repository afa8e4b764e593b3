//! Recipe management REST API server
//!
//! Provides:
//! - **Users** (`api::users`): registration, token exchange, profile management
//! - **Recipes** (`api::recipes`): owner-scoped CRUD with tag filtering and
//!   image upload
//! - **Tags** (`api::tags`): owner-scoped list/update/delete
//! - **Auth** (`auth`): opaque bearer tokens validated by database lookup
//! - **Media** (`api::media`): serves uploaded images

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod state;
pub mod util;

// Re-export public types
pub use auth::CurrentUser;
pub use config::Config;
pub use state::AppState;
