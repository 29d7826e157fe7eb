use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::QueueControl;

pub struct Operation;

fn up_statement() -> TableCreateStatement {
    Table::create()
        .table(QueueControl::Table)
        .col(
            ColumnDef::new(QueueControl::Name)
                .string()
                .not_null()
                .string_len(50)
                .primary_key(),
        )
        .col(
            ColumnDef::new(QueueControl::Paused)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(
            ColumnDef::new(QueueControl::UpdatedAt)
                .big_integer()
                .not_null(),
        )
        .to_owned()
}

fn down_statement() -> TableDropStatement {
    Table::drop().table(QueueControl::Table).to_owned()
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
