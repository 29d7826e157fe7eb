use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{ConnectOptions, SqlitePool};
use std::str::FromStr;
use tracing::log::LevelFilter;

/// PRAGMAs applied to every pool.
///
/// WAL allows reads to proceed alongside the single writer,
/// busy_timeout absorbs transient SQLITE_BUSY, synchronous=NORMAL is
/// safe under WAL, and foreign_keys is off by default in SQLite so it
/// has to be switched on per connection.
const PRAGMAS: &[&str] = &[
    "PRAGMA journal_mode = WAL",
    "PRAGMA busy_timeout = 5000",
    "PRAGMA synchronous = NORMAL",
    "PRAGMA cache_size = -20000",
    "PRAGMA foreign_keys = true",
    "PRAGMA temp_store = memory",
];

async fn configure_pragmas(pool: &SqlitePool) -> Result<()> {
    for pragma in PRAGMAS {
        sqlx::query(pragma).execute(pool).await?;
    }

    Ok(())
}

/// Create a read-only connection pool for concurrent queries.
///
/// Open the write pool first: switching a database into WAL mode
/// needs a writable connection.
pub async fn create_read_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .read_only(true)
        .log_statements(LevelFilter::Debug);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    configure_pragmas(&pool).await?;

    tracing::info!(max_connections, "created read-only pool");

    Ok(pool)
}

/// Create the read-write pool. Limited to a single connection so
/// writes never race into SQLITE_BUSY; every write and transaction
/// goes through this pool.
pub async fn create_write_pool(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.log_statements(LevelFilter::Debug);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    configure_pragmas(&pool).await?;

    tracing::info!("created read-write pool with 1 max connection");

    Ok(pool)
}

/// Create a standard pool with the same PRAGMAs, for one-shot CLI
/// commands where read/write separation is not worth the setup.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.log_statements(LevelFilter::Debug);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    configure_pragmas(&pool).await?;

    tracing::info!(max_connections, "created pool");

    Ok(pool)
}
