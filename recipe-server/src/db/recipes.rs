use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RecipeRow {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub time_minutes: i64,
    pub price: String,
    pub description: String,
    pub link: String,
    pub image: Option<String>,
    pub created_at: i64,
}

pub async fn create(
    conn: &mut SqliteConnection,
    user_id: i64,
    title: &str,
    time_minutes: i64,
    price: &str,
    description: &str,
    link: &str,
    now: i64,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO recipes (user_id, title, time_minutes, price, description, link, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(user_id)
    .bind(title)
    .bind(time_minutes)
    .bind(price)
    .bind(description)
    .bind(link)
    .bind(now)
    .execute(conn)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn find_for_user(
    pool: &SqlitePool,
    user_id: i64,
    id: i64,
) -> Result<Option<RecipeRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM recipes WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Recipes owned by a user, newest first.
///
/// With `tag_ids`, keeps only recipes carrying at least one of the given
/// tags. EXISTS keeps a recipe matching several requested tags from
/// appearing twice.
pub async fn list_for_user(
    pool: &SqlitePool,
    user_id: i64,
    tag_ids: Option<&[i64]>,
) -> Result<Vec<RecipeRow>, sqlx::Error> {
    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT * FROM recipes WHERE user_id = ");
    qb.push_bind(user_id);

    if let Some(ids) = tag_ids.filter(|ids| !ids.is_empty()) {
        qb.push(
            " AND EXISTS (SELECT 1 FROM recipe_tags rt \
             WHERE rt.recipe_id = recipes.id AND rt.tag_id IN (",
        );
        let mut sep = qb.separated(", ");
        for id in ids {
            sep.push_bind(*id);
        }
        sep.push_unseparated("))");
    }

    qb.push(" ORDER BY id DESC");
    qb.build_query_as::<RecipeRow>().fetch_all(pool).await
}

/// Partial update; None keeps the stored value. The owner column is never
/// touched. rows_affected is 0 when the recipe is absent or foreign.
#[allow(clippy::too_many_arguments)]
pub async fn update(
    conn: &mut SqliteConnection,
    user_id: i64,
    id: i64,
    title: Option<&str>,
    time_minutes: Option<i64>,
    price: Option<&str>,
    description: Option<&str>,
    link: Option<&str>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE recipes SET
            title = COALESCE(?, title),
            time_minutes = COALESCE(?, time_minutes),
            price = COALESCE(?, price),
            description = COALESCE(?, description),
            link = COALESCE(?, link)
         WHERE id = ? AND user_id = ?",
    )
    .bind(title)
    .bind(time_minutes)
    .bind(price)
    .bind(description)
    .bind(link)
    .bind(id)
    .bind(user_id)
    .execute(conn)
    .await?;
    Ok(result.rows_affected())
}

pub async fn set_image(
    pool: &SqlitePool,
    user_id: i64,
    id: i64,
    image: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE recipes SET image = ? WHERE id = ? AND user_id = ?")
        .bind(image)
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn delete(pool: &SqlitePool, user_id: i64, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM recipes WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Replace a recipe's tag associations with exactly the given set
pub async fn set_tags(
    conn: &mut SqliteConnection,
    recipe_id: i64,
    tag_ids: &[i64],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM recipe_tags WHERE recipe_id = ?")
        .bind(recipe_id)
        .execute(&mut *conn)
        .await?;

    for tag_id in tag_ids {
        sqlx::query(
            "INSERT INTO recipe_tags (recipe_id, tag_id) VALUES (?, ?)
             ON CONFLICT DO NOTHING",
        )
        .bind(recipe_id)
        .bind(*tag_id)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}
