use anyhow::Result;
use sqlx::migrate::MigrateDatabase;
use sqlx_migrator::{Migrate, Plan};

use crate::config::Config;

/// Create the database if it is missing and bring it up to date.
pub async fn migrate(config: &Config) -> Result<()> {
    if !sqlx::Sqlite::database_exists(&config.database.url).await? {
        tracing::info!(url = %config.database.url, "database does not exist, creating");
        sqlx::Sqlite::create_database(&config.database.url).await?;
    }

    let pool = crate::db::create_pool(&config.database.url, 1).await?;
    let mut conn = pool.acquire().await?;
    stockpot_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;
    drop(conn);

    tracing::info!("migrations completed");

    Ok(())
}

/// Drop the database if it exists, then recreate it with migrations.
pub async fn reset(config: &Config) -> Result<()> {
    if sqlx::Sqlite::database_exists(&config.database.url).await? {
        tracing::warn!(url = %config.database.url, "dropping existing database");
        sqlx::Sqlite::drop_database(&config.database.url).await?;
    } else {
        tracing::info!("database does not exist, nothing to drop");
    }

    migrate(config).await
}
