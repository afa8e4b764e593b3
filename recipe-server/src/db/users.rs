use sqlx::SqlitePool;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub created_at: i64,
}

pub async fn create(
    pool: &SqlitePool,
    email: &str,
    password_hash: &str,
    name: &str,
    now: i64,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO users (email, password_hash, name, created_at)
         VALUES (?, ?, ?, ?)",
    )
    .bind(email)
    .bind(password_hash)
    .bind(name)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn create_staff(
    pool: &SqlitePool,
    email: &str,
    password_hash: &str,
    name: &str,
    now: i64,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO users (email, password_hash, name, is_staff, created_at)
         VALUES (?, ?, ?, 1, ?)",
    )
    .bind(email)
    .bind(password_hash)
    .bind(name)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Partial profile update; None keeps the stored value
pub async fn update_profile(
    pool: &SqlitePool,
    id: i64,
    email: Option<&str>,
    name: Option<&str>,
    password_hash: Option<&str>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE users SET
            email = COALESCE(?, email),
            name = COALESCE(?, name),
            password_hash = COALESCE(?, password_hash)
         WHERE id = ?",
    )
    .bind(email)
    .bind(name)
    .bind(password_hash)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;

    async fn pool() -> SqlitePool {
        AppState::new_in_memory("media").await.unwrap().pool
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let pool = pool().await;
        let id = create(&pool, "test@example.com", "hash", "Test Name", 1)
            .await
            .unwrap();

        let user = find_by_email(&pool, "test@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.name, "Test Name");
        assert!(user.is_active);
        assert!(!user.is_staff);

        let user = find_by_id(&pool, id).await.unwrap().unwrap();
        assert_eq!(user.email, "test@example.com");
    }

    #[tokio::test]
    async fn test_create_staff_sets_flag() {
        let pool = pool().await;
        let id = create_staff(&pool, "admin@example.com", "hash", "Admin", 1)
            .await
            .unwrap();
        let user = find_by_id(&pool, id).await.unwrap().unwrap();
        assert!(user.is_staff);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let pool = pool().await;
        create(&pool, "dup@example.com", "hash", "First", 1)
            .await
            .unwrap();
        let err = create(&pool, "dup@example.com", "hash", "Second", 2)
            .await
            .unwrap_err();
        assert!(
            err.as_database_error()
                .is_some_and(|e| e.is_unique_violation())
        );
    }

    #[tokio::test]
    async fn test_update_profile_partial() {
        let pool = pool().await;
        let id = create(&pool, "user@example.com", "hash", "Old Name", 1)
            .await
            .unwrap();

        update_profile(&pool, id, None, Some("New Name"), None)
            .await
            .unwrap();

        let user = find_by_id(&pool, id).await.unwrap().unwrap();
        assert_eq!(user.name, "New Name");
        assert_eq!(user.email, "user@example.com");
        assert_eq!(user.password_hash, "hash");
    }
}
