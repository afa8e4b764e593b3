//! Application state for recipe-server

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::config::Config;
use crate::db;
use crate::util::hash_password;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Connection attempts before giving up on the database
const CONNECT_ATTEMPTS: u32 = 10;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// Directory where uploaded media files are stored
    pub media_root: PathBuf,
}

impl AppState {
    /// Create a new AppState
    ///
    /// Waits for the database to accept connections (one retry per second),
    /// runs pending migrations and creates the bootstrap admin account when
    /// configured.
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let options = SqliteConnectOptions::from_str(&config.database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let mut attempt = 1;
        let pool = loop {
            match SqlitePoolOptions::new()
                .connect_with(options.clone())
                .await
            {
                Ok(pool) => break pool,
                Err(e) if attempt < CONNECT_ATTEMPTS => {
                    tracing::warn!("Database unavailable (attempt {attempt}): {e}, retrying in 1s");
                    tokio::time::sleep(Duration::from_secs(1)).await;
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        };

        sqlx::migrate!("./migrations").run(&pool).await?;

        let state = Self {
            pool,
            media_root: PathBuf::from(&config.media_root),
        };

        if let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) {
            state.ensure_admin(email, password).await?;
        }

        Ok(state)
    }

    /// Create an AppState backed by an in-memory database
    ///
    /// Capped at a single connection; the `:memory:` database lives only as
    /// long as that connection does.
    pub async fn new_in_memory(media_root: impl Into<PathBuf>) -> Result<Self, BoxError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self {
            pool,
            media_root: media_root.into(),
        })
    }

    /// Create the admin account unless a user with that email already exists
    async fn ensure_admin(&self, email: &str, password: &str) -> Result<(), BoxError> {
        let email = shared::util::normalize_email(email);
        if db::users::find_by_email(&self.pool, &email)
            .await?
            .is_some()
        {
            return Ok(());
        }

        let password_hash = hash_password(password)?;
        db::users::create_staff(
            &self.pool,
            &email,
            &password_hash,
            "Admin",
            shared::util::now_millis(),
        )
        .await?;
        tracing::info!("Created admin account {email}");
        Ok(())
    }
}
