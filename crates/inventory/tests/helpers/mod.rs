use std::{path::PathBuf, str::FromStr};

use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

use stockpot_inventory::{IngredientCategory, IngredientInput};

pub struct TestState {
    pub pool: SqlitePool,
}

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<TestState> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    stockpot_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(TestState { pool })
}

#[allow(dead_code)]
pub fn ingredient_input(name: &str) -> IngredientInput {
    IngredientInput {
        name: name.to_string(),
        category: IngredientCategory::Pantry,
        purchase_unit: "kg".into(),
        pack_size: 25.0,
        pack_price: 18.5,
        cost_unit: "g".into(),
        wastage_pct: 0.0,
        stock_qty: 5000.0,
        reorder_level: 1000.0,
    }
}
