use sea_query::{Expr, ExprTrait, Order, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;
use strum::{Display, EnumString, VariantArray};

use stockpot_db::table::Ingredient;
use stockpot_units::CostConverter;

use crate::costing;
use crate::model::IngredientCategory;

#[derive(Debug, FromRow)]
pub struct IngredientRow {
    pub id: String,
    pub name: String,
    pub category: sqlx::types::Text<IngredientCategory>,
    pub purchase_unit: String,
    pub pack_size: f64,
    pub pack_price: f64,
    pub cost_unit: String,
    pub cost_per_unit: f64,
    pub wastage_pct: f64,
    pub stock_qty: f64,
    pub reorder_level: f64,
    pub created_at: i64,
    pub updated_at: Option<i64>,
}

impl IngredientRow {
    pub fn category(&self) -> IngredientCategory {
        self.category.0
    }

    /// Unit cost inflated by wastage, the figure recipe costing should
    /// use for this ingredient.
    pub fn effective_cost_per_unit(&self) -> f64 {
        costing::effective_unit_cost(self.cost_per_unit, self.wastage_pct)
    }

    pub fn is_low_stock(&self) -> bool {
        self.stock_qty <= self.reorder_level
    }

    /// Express the unit cost per `display_unit` instead of the stored
    /// costing unit. Falls back to the stored figure when the units do
    /// not line up.
    pub fn cost_in(&self, display_unit: &str, converter: &mut CostConverter) -> f64 {
        converter.convert(self.cost_per_unit, display_unit, &self.cost_unit, &self.name)
    }
}

/// Listing order for [`list_ingredients`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Display, EnumString, VariantArray)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SortBy {
    #[default]
    Name,
    CostPerUnit,
    StockQty,
    Newest,
}

#[derive(Debug, Default)]
pub struct IngredientFilter {
    pub search: Option<String>,
    pub category: Option<IngredientCategory>,
    pub low_stock_only: bool,
    pub sort_by: SortBy,
}

fn base_select() -> SelectStatement {
    sea_query::Query::select()
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
            Ingredient::UpdatedAt,
        ])
        .from(Ingredient::Table)
        .to_owned()
}

pub async fn find_ingredient(
    pool: &sqlx::SqlitePool,
    id: impl Into<String>,
) -> anyhow::Result<Option<IngredientRow>> {
    let statement = base_select()
        .and_where(Expr::col(Ingredient::Id).eq(id.into()))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, IngredientRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

pub async fn find_ingredient_by_name(
    pool: &sqlx::SqlitePool,
    name: impl Into<String>,
) -> anyhow::Result<Option<IngredientRow>> {
    let statement = base_select()
        .and_where(Expr::col(Ingredient::Name).eq(name.into()))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, IngredientRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

pub async fn list_ingredients(
    pool: &sqlx::SqlitePool,
    filter: IngredientFilter,
) -> anyhow::Result<Vec<IngredientRow>> {
    let mut statement = base_select();

    if let Some(term) = &filter.search {
        statement.and_where(Expr::col(Ingredient::Name).like(format!("%{term}%")));
    }

    if let Some(category) = filter.category {
        statement.and_where(Expr::col(Ingredient::Category).eq(category.to_string()));
    }

    if filter.low_stock_only {
        statement
            .and_where(Expr::col(Ingredient::StockQty).lte(Expr::col(Ingredient::ReorderLevel)));
    }

    match filter.sort_by {
        SortBy::Name => statement.order_by(Ingredient::Name, Order::Asc),
        SortBy::CostPerUnit => statement.order_by(Ingredient::CostPerUnit, Order::Desc),
        SortBy::StockQty => statement.order_by(Ingredient::StockQty, Order::Asc),
        SortBy::Newest => statement.order_by(Ingredient::CreatedAt, Order::Desc),
    };

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, IngredientRow, _>(&sql, values)
        .fetch_all(pool)
        .await?)
}

pub async fn count_ingredients(pool: &sqlx::SqlitePool) -> anyhow::Result<i64> {
    let statement = sea_query::Query::select()
        .expr(Expr::col(Ingredient::Id).count())
        .from(Ingredient::Table)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_scalar_with::<_, i64, _>(&sql, values)
        .fetch_one(pool)
        .await?)
}
