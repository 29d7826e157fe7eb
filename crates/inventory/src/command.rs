use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqlitePool;
use tokio::sync::Mutex;
use validator::Validate;

use stockpot_db::table::Ingredient;
use stockpot_units::CostConverter;

use crate::costing;
use crate::error::{InventoryError, InventoryResult};
use crate::model::IngredientInput;
use crate::query;

/// Write-side entry point for the ingredient store.
///
/// Owns the single-writer pool plus a read pool for existence checks,
/// and one [`CostConverter`] so repeated unresolvable unit pairs warn
/// once per process instead of once per row.
pub struct Command {
    write_db: SqlitePool,
    read_db: SqlitePool,
    converter: Mutex<CostConverter>,
}

impl Command {
    pub fn new(write_db: SqlitePool, read_db: SqlitePool) -> Self {
        Self {
            write_db,
            read_db,
            converter: Mutex::new(CostConverter::new()),
        }
    }

    pub async fn create(&self, input: IngredientInput) -> InventoryResult<String> {
        input.validate()?;

        if query::find_ingredient_by_name(&self.read_db, &input.name)
            .await?
            .is_some()
        {
            return Err(InventoryError::DuplicateName(input.name));
        }

        let id = ulid::Ulid::new().to_string();
        let cost_per_unit = self.derive_unit_cost(&input).await;
        let now = time::OffsetDateTime::now_utc().unix_timestamp();

        let statement = Query::insert()
            .into_table(Ingredient::Table)
            .columns([
                Ingredient::Id,
                Ingredient::Name,
                Ingredient::Category,
                Ingredient::PurchaseUnit,
                Ingredient::PackSize,
                Ingredient::PackPrice,
                Ingredient::CostUnit,
                Ingredient::CostPerUnit,
                Ingredient::WastagePct,
                Ingredient::StockQty,
                Ingredient::ReorderLevel,
                Ingredient::CreatedAt,
            ])
            .values_panic([
                id.clone().into(),
                input.name.clone().into(),
                input.category.to_string().into(),
                input.purchase_unit.into(),
                input.pack_size.into(),
                input.pack_price.into(),
                input.cost_unit.into(),
                cost_per_unit.into(),
                input.wastage_pct.into(),
                input.stock_qty.into(),
                input.reorder_level.into(),
                now.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        tracing::info!(ingredient = %id, name = %input.name, "ingredient created");

        Ok(id)
    }

    pub async fn update(&self, id: impl Into<String>, input: IngredientInput) -> InventoryResult<()> {
        let id = id.into();
        input.validate()?;

        if let Some(existing) =
            query::find_ingredient_by_name(&self.read_db, &input.name).await?
        {
            if existing.id != id {
                return Err(InventoryError::DuplicateName(input.name));
            }
        }

        let cost_per_unit = self.derive_unit_cost(&input).await;
        let now = time::OffsetDateTime::now_utc().unix_timestamp();

        let statement = Query::update()
            .table(Ingredient::Table)
            .values([
                (Ingredient::Name, input.name.into()),
                (Ingredient::Category, input.category.to_string().into()),
                (Ingredient::PurchaseUnit, input.purchase_unit.into()),
                (Ingredient::PackSize, input.pack_size.into()),
                (Ingredient::PackPrice, input.pack_price.into()),
                (Ingredient::CostUnit, input.cost_unit.into()),
                (Ingredient::CostPerUnit, cost_per_unit.into()),
                (Ingredient::WastagePct, input.wastage_pct.into()),
                (Ingredient::StockQty, input.stock_qty.into()),
                (Ingredient::ReorderLevel, input.reorder_level.into()),
                (Ingredient::UpdatedAt, now.into()),
            ])
            .and_where(Expr::col(Ingredient::Id).eq(&id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(InventoryError::NotFound);
        }

        tracing::info!(ingredient = %id, "ingredient updated");

        Ok(())
    }

    pub async fn delete(&self, id: impl Into<String>) -> InventoryResult<()> {
        let id = id.into();

        let statement = Query::delete()
            .from_table(Ingredient::Table)
            .and_where(Expr::col(Ingredient::Id).eq(&id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(InventoryError::NotFound);
        }

        tracing::info!(ingredient = %id, "ingredient deleted");

        Ok(())
    }

    /// Add a signed delta, in the costing unit, to the stock level.
    /// Returns the new level. The check-then-write runs inside a
    /// transaction on the single-writer pool, so concurrent
    /// adjustments cannot interleave.
    pub async fn adjust_stock(&self, id: impl Into<String>, delta: f64) -> InventoryResult<f64> {
        let id = id.into();
        let mut tx = self.write_db.begin().await?;

        let statement = Query::select()
            .column(Ingredient::StockQty)
            .from(Ingredient::Table)
            .and_where(Expr::col(Ingredient::Id).eq(&id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let Some((stock_qty,)) = sqlx::query_as_with::<_, (f64,), _>(&sql, values)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Err(InventoryError::NotFound);
        };

        let next = stock_qty + delta;
        if next < 0.0 {
            return Err(InventoryError::InsufficientStock {
                available: stock_qty,
                requested: -delta,
            });
        }

        let now = time::OffsetDateTime::now_utc().unix_timestamp();
        let statement = Query::update()
            .table(Ingredient::Table)
            .values([
                (Ingredient::StockQty, next.into()),
                (Ingredient::UpdatedAt, now.into()),
            ])
            .and_where(Expr::col(Ingredient::Id).eq(&id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        tx.commit().await?;

        tracing::info!(ingredient = %id, stock_qty = next, "stock adjusted");

        Ok(next)
    }

    /// Re-arm the once-per-pair conversion warnings, typically after a
    /// bulk import so the next batch reports its own problems.
    pub async fn reset_cost_warnings(&self) {
        self.converter.lock().await.reset();
    }

    async fn derive_unit_cost(&self, input: &IngredientInput) -> f64 {
        let mut converter = self.converter.lock().await;
        costing::unit_cost(
            input.pack_price,
            input.pack_size,
            &input.purchase_unit,
            &input.cost_unit,
            &input.name,
            &mut converter,
        )
    }
}
