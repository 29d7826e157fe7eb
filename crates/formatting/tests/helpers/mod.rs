use std::{path::PathBuf, str::FromStr};

use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

use stockpot_formatting::Queue;

pub struct TestState {
    pub pool: SqlitePool,
    pub queue: Queue,
}

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<TestState> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    stockpot_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;
    let queue = Queue::new(pool.clone(), pool.clone());

    Ok(TestState { pool, queue })
}

#[allow(dead_code)]
pub const SAMPLE_BODY: &str = "Ingredients:
- 250 gm paneer
- 2 tbsp butter
- 1/2 tsp salt

Instructions:
1. Melt the butter
2. Add the paneer and salt";
