use crate::database::DbError;
use app_state::DatabaseSettings;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::str::FromStr;
use tracing::info;

/// Connect to the database and bring the schema up to date.
///
/// # Errors
///
/// * The configured url is not a valid sqlite url.
/// * The database cannot be opened or created.
/// * `sqlx::migrate` can return an error if migrations fail.
pub async fn get_db_pool(db_settings: &DatabaseSettings) -> Result<SqlitePool, DbError> {
    info!("Connecting to database.");
    let options = SqliteConnectOptions::from_str(&db_settings.url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(db_settings.acquire_timeout());
    let pool = SqlitePoolOptions::new()
        .max_connections(db_settings.max_connections)
        .min_connections(db_settings.min_connections)
        .acquire_timeout(db_settings.acquire_timeout())
        .idle_timeout(db_settings.idle_timeout())
        .test_before_acquire(true)
        .connect_with(options)
        .await?;
    migrate(&pool).await?;
    Ok(pool)
}

/// Apply all pending migrations. Creates the unsorted album on a fresh database.
pub async fn migrate(pool: &SqlitePool) -> Result<(), DbError> {
    sqlx::migrate!("../../../migrations").run(pool).await?;
    info!("Database migrations applied.");
    Ok(())
}

/// Starts a transaction that holds the sqlite write lock from its first statement.
/// A concurrent writer waits for the busy timeout instead of failing on lock upgrade.
pub async fn begin_write(pool: &SqlitePool) -> Result<Transaction<'static, Sqlite>, DbError> {
    Ok(pool.begin_with("BEGIN IMMEDIATE").await?)
}

/// Single-connection in-memory database with the schema applied.
/// Every connection to `sqlite::memory:` is its own database, so the pool
/// never opens a second one and never lets the first expire.
#[cfg(test)]
pub(crate) async fn test_pool() -> Result<SqlitePool, DbError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    migrate(&pool).await?;
    Ok(pool)
}
