use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::Ingredient;

pub struct Operation;

fn up_statement() -> TableCreateStatement {
    Table::create()
        .table(Ingredient::Table)
        .col(
            ColumnDef::new(Ingredient::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(Ingredient::Name)
                .string()
                .not_null()
                .string_len(120),
        )
        .col(
            ColumnDef::new(Ingredient::Category)
                .string()
                .not_null()
                .string_len(25),
        )
        .col(
            ColumnDef::new(Ingredient::PurchaseUnit)
                .string()
                .not_null()
                .string_len(25),
        )
        .col(ColumnDef::new(Ingredient::PackSize).double().not_null())
        .col(ColumnDef::new(Ingredient::PackPrice).double().not_null())
        .col(
            ColumnDef::new(Ingredient::CostUnit)
                .string()
                .not_null()
                .string_len(25),
        )
        .col(ColumnDef::new(Ingredient::CostPerUnit).double().not_null())
        .col(
            ColumnDef::new(Ingredient::WastagePct)
                .double()
                .not_null()
                .default(0.0),
        )
        .col(
            ColumnDef::new(Ingredient::StockQty)
                .double()
                .not_null()
                .default(0.0),
        )
        .col(
            ColumnDef::new(Ingredient::ReorderLevel)
                .double()
                .not_null()
                .default(0.0),
        )
        .col(
            ColumnDef::new(Ingredient::CreatedAt)
                .big_integer()
                .not_null(),
        )
        .col(ColumnDef::new(Ingredient::UpdatedAt).big_integer().null())
        .to_owned()
}

fn down_statement() -> TableDropStatement {
    Table::drop().table(Ingredient::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for Operation {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = up_statement().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = down_statement().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}
