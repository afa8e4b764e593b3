use shared::models::Tag;
use sqlx::{SqliteConnection, SqlitePool};

/// Tag attached to a recipe, carrying the recipe id for grouping
#[derive(sqlx::FromRow)]
pub struct RecipeTag {
    pub recipe_id: i64,
    pub id: i64,
    pub name: String,
}

/// Tags owned by a user, ordered by descending name
pub async fn list_for_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<Tag>, sqlx::Error> {
    sqlx::query_as("SELECT id, name FROM tags WHERE user_id = ? ORDER BY name DESC")
        .bind(user_id)
        .fetch_all(pool)
        .await
}

pub async fn find_for_user(
    pool: &SqlitePool,
    user_id: i64,
    id: i64,
) -> Result<Option<Tag>, sqlx::Error> {
    sqlx::query_as("SELECT id, name FROM tags WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Resolve a tag name to the owner's row, inserting it first when absent.
///
/// The UNIQUE (user_id, name) constraint makes the insert a no-op when the
/// name already exists, so concurrent writers converge on one row.
pub async fn get_or_create(
    conn: &mut SqliteConnection,
    user_id: i64,
    name: &str,
    now: i64,
) -> Result<Tag, sqlx::Error> {
    sqlx::query(
        "INSERT INTO tags (user_id, name, created_at) VALUES (?, ?, ?)
         ON CONFLICT (user_id, name) DO NOTHING",
    )
    .bind(user_id)
    .bind(name)
    .bind(now)
    .execute(&mut *conn)
    .await?;

    sqlx::query_as("SELECT id, name FROM tags WHERE user_id = ? AND name = ?")
        .bind(user_id)
        .bind(name)
        .fetch_one(&mut *conn)
        .await
}

/// Rename a tag; rows_affected is 0 when the tag is absent or foreign
pub async fn update_name(
    pool: &SqlitePool,
    user_id: i64,
    id: i64,
    name: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE tags SET name = ? WHERE id = ? AND user_id = ?")
        .bind(name)
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn delete(pool: &SqlitePool, user_id: i64, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tags WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Tags associated with one recipe
pub async fn list_for_recipe(pool: &SqlitePool, recipe_id: i64) -> Result<Vec<Tag>, sqlx::Error> {
    sqlx::query_as(
        "SELECT t.id, t.name FROM tags t
         JOIN recipe_tags rt ON rt.tag_id = t.id
         WHERE rt.recipe_id = ?
         ORDER BY t.id",
    )
    .bind(recipe_id)
    .fetch_all(pool)
    .await
}

/// Tags for every recipe owned by a user, for grouping into list responses
pub async fn list_for_owner_recipes(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Vec<RecipeTag>, sqlx::Error> {
    sqlx::query_as(
        "SELECT rt.recipe_id, t.id, t.name FROM tags t
         JOIN recipe_tags rt ON rt.tag_id = t.id
         JOIN recipes r ON r.id = rt.recipe_id
         WHERE r.user_id = ?
         ORDER BY t.id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}
