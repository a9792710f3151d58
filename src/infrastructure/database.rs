//! Pooled SQLite connection and startup schema initialization.

use anyhow::anyhow;
use di::inject;
use di::injectable;
use log::{info, warn};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::env;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;
use std::sync::RwLock;
use std::time::Duration;

/// Pool connected at startup (or by a test harness), handed to the
/// DI-constructed [`DatabaseConnection`].
static SHARED_POOL: RwLock<Option<SqlitePool>> = RwLock::new(None);

/// Database settings resolved from the environment.
#[derive(Debug, Clone)]
pub struct DbSettings {
    pub url: String,
    pub max_connections: u32,
    pub max_attempts: u32,
    pub retry_delay: Duration,
}

impl DbSettings {
    /// Reads settings from the environment, falling back to defaults.
    ///
    /// `DATABASE_URL` wins when set; otherwise the database name comes from
    /// `DB_NAME` (default `guestbook`) as an on-disk SQLite file.
    pub fn from_env() -> DbSettings {
        dotenvy::dotenv().ok();
        let url = env::var("DATABASE_URL").unwrap_or_else(|_| {
            let name = env::var("DB_NAME").unwrap_or_else(|_| "guestbook".to_string());
            format!("sqlite://{name}.db")
        });

        DbSettings {
            url,
            max_connections: 10,
            max_attempts: 10,
            retry_delay: Duration::from_secs(5),
        }
    }
}

/// Opens the pool and ensures the schema exists, retrying with a fixed delay.
///
/// Returns the ready pool, or an error once `max_attempts` attempts have
/// failed. The caller decides whether that is fatal.
pub async fn connect_with_retry(settings: &DbSettings) -> anyhow::Result<SqlitePool> {
    for attempt in 1..=settings.max_attempts {
        match try_connect(settings).await {
            Ok(pool) => {
                info!("database connected and guestbook table ready");
                return Ok(pool);
            }
            Err(e) => {
                warn!(
                    "waiting for database (attempt {attempt}/{}): {e}",
                    settings.max_attempts
                );
                if attempt < settings.max_attempts {
                    tokio::time::sleep(settings.retry_delay).await;
                }
            }
        }
    }

    Err(anyhow!(
        "failed to connect to database after {} attempts",
        settings.max_attempts
    ))
}

async fn try_connect(settings: &DbSettings) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&settings.url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_with(options)
        .await?;
    ensure_schema(&pool).await?;
    Ok(pool)
}

/// Creates the guestbook table if absent. Idempotent.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS guestbook (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            message TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now'))
        )"#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

pub struct DatabaseConnection {
    connection: SqlitePool,
}

#[injectable]
impl DatabaseConnection {
    #[inject]
    pub fn create() -> DatabaseConnection {
        if let Some(pool) = SHARED_POOL.read().expect("shared pool lock poisoned").clone() {
            return DatabaseConnection { connection: pool };
        }

        // No pool was set up front; connect lazily from the environment.
        let settings = DbSettings::from_env();
        let options = SqliteConnectOptions::from_str(&settings.url)
            .expect("invalid database URL")
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(settings.max_connections)
            .connect_lazy_with(options);

        DatabaseConnection { connection: pool }
    }
}

impl DatabaseConnection {
    /// Hands an already-connected pool to subsequently created instances.
    pub fn set_shared_pool(pool: SqlitePool) {
        *SHARED_POOL.write().expect("shared pool lock poisoned") = Some(pool);
    }

    pub fn clear_shared_pool() {
        *SHARED_POOL.write().expect("shared pool lock poisoned") = None;
    }
}

impl Deref for DatabaseConnection {
    type Target = SqlitePool;

    fn deref(&self) -> &Self::Target {
        &self.connection
    }
}

impl DerefMut for DatabaseConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.connection
    }
}
