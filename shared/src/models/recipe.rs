//! Recipe Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::tag::{Tag, TagCreate};

/// Recipe list representation
///
/// Serves the collection endpoint; detail adds `description` and `image`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: i64,
    pub title: String,
    pub time_minutes: i64,
    /// Serialized as a string with two decimal places (e.g. "5.25")
    pub price: Decimal,
    pub link: String,
    pub tags: Vec<Tag>,
}

/// Recipe detail representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDetail {
    pub id: i64,
    pub title: String,
    pub time_minutes: i64,
    pub price: Decimal,
    pub link: String,
    pub tags: Vec<Tag>,
    pub description: String,
    /// Media URL of the attached image, if one was uploaded
    pub image: Option<String>,
}

/// Create recipe payload
///
/// The owner comes from the authenticated identity, never from the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeCreate {
    pub title: String,
    pub time_minutes: i64,
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link: String,
    pub tags: Option<Vec<TagCreate>>,
}

/// Full update payload (PUT)
///
/// Core fields are required; omitted optional fields keep their stored value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeReplace {
    pub title: String,
    pub time_minutes: i64,
    pub price: Decimal,
    pub description: Option<String>,
    pub link: Option<String>,
    pub tags: Option<Vec<TagCreate>>,
}

/// Partial update payload (PATCH)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeUpdate {
    pub title: Option<String>,
    pub time_minutes: Option<i64>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub tags: Option<Vec<TagCreate>>,
}

/// Image reference returned by the upload endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeImageRef {
    pub id: i64,
    pub image: Option<String>,
}
