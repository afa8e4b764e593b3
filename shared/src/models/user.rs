//! User Model

use serde::{Deserialize, Serialize};

/// Public user representation (credentials never serialized)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPublic {
    pub email: String,
    pub name: String,
}

/// Registration payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Full profile update payload (PUT)
///
/// Password stays unchanged when omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserReplace {
    pub email: String,
    pub name: String,
    pub password: Option<String>,
}

/// Partial profile update payload (PATCH)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

/// Credential exchange payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRequest {
    pub email: String,
    pub password: String,
}

/// Issued token response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}
