use sqlx::SqlitePool;

use super::users::User;

/// Find the user's token, so repeated logins reuse one token
pub async fn find_for_user(pool: &SqlitePool, user_id: i64) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar("SELECT token FROM api_tokens WHERE user_id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Store `candidate` as the user's token unless one exists already.
///
/// The UNIQUE constraint on user_id makes the insert a no-op when a token
/// is present, so concurrent logins converge on one row. Returns the stored
/// token, which may predate `candidate`.
pub async fn get_or_create(
    pool: &SqlitePool,
    candidate: &str,
    user_id: i64,
    now: i64,
) -> Result<String, sqlx::Error> {
    sqlx::query(
        "INSERT INTO api_tokens (token, user_id, created_at) VALUES (?, ?, ?)
         ON CONFLICT (user_id) DO NOTHING",
    )
    .bind(candidate)
    .bind(user_id)
    .bind(now)
    .execute(pool)
    .await?;

    sqlx::query_scalar("SELECT token FROM api_tokens WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await
}

/// Resolve a token to its owning user, if the token exists
pub async fn find_user(pool: &SqlitePool, token: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as(
        "SELECT u.* FROM users u
         JOIN api_tokens t ON t.user_id = u.id
         WHERE t.token = ?",
    )
    .bind(token)
    .fetch_optional(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::users;
    use crate::state::AppState;

    #[tokio::test]
    async fn test_store_and_resolve() {
        let pool = AppState::new_in_memory("media").await.unwrap().pool;
        let user_id = users::create(&pool, "test@example.com", "hash", "Test", 1)
            .await
            .unwrap();

        let token = get_or_create(&pool, "token-abc", user_id, 1).await.unwrap();
        assert_eq!(token, "token-abc");

        let user = find_user(&pool, "token-abc").await.unwrap().unwrap();
        assert_eq!(user.id, user_id);
        assert_eq!(user.email, "test@example.com");

        assert!(find_user(&pool, "unknown").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_for_user() {
        let pool = AppState::new_in_memory("media").await.unwrap().pool;
        let user_id = users::create(&pool, "test@example.com", "hash", "Test", 1)
            .await
            .unwrap();

        assert!(find_for_user(&pool, user_id).await.unwrap().is_none());

        get_or_create(&pool, "token-abc", user_id, 1).await.unwrap();
        let token = find_for_user(&pool, user_id).await.unwrap();
        assert_eq!(token.as_deref(), Some("token-abc"));
    }

    #[tokio::test]
    async fn test_second_candidate_keeps_first_token() {
        let pool = AppState::new_in_memory("media").await.unwrap().pool;
        let user_id = users::create(&pool, "test@example.com", "hash", "Test", 1)
            .await
            .unwrap();

        let first = get_or_create(&pool, "token-one", user_id, 1).await.unwrap();
        let second = get_or_create(&pool, "token-two", user_id, 2).await.unwrap();

        assert_eq!(first, "token-one");
        assert_eq!(second, "token-one");

        // The losing candidate never became a valid credential
        let user = find_user(&pool, "token-one").await.unwrap().unwrap();
        assert_eq!(user.id, user_id);
        assert!(find_user(&pool, "token-two").await.unwrap().is_none());
    }
}
