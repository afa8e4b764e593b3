//! Tag Model

use serde::{Deserialize, Serialize};

/// Tag entity
///
/// Tags are scoped to their owning user; the owner never appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

/// Tag payload carrying just a name
///
/// Element shape of the nested `tags` list on recipe writes, and the
/// full-replace body for `PUT /tags/{id}/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagCreate {
    pub name: String,
}

/// Update tag payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagUpdate {
    pub name: Option<String>,
}
