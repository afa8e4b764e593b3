//! Database access layer

pub mod recipes;
pub mod tags;
pub mod tokens;
pub mod users;
