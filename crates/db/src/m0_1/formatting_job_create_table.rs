use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::FormattingJob;

pub struct Operation;

fn up_statement() -> TableCreateStatement {
    Table::create()
        .table(FormattingJob::Table)
        .col(
            ColumnDef::new(FormattingJob::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(FormattingJob::Title)
                .string()
                .not_null()
                .string_len(200),
        )
        .col(
            ColumnDef::new(FormattingJob::SourceUrl)
                .string()
                .not_null()
                .string_len(500)
                .default(""),
        )
        .col(ColumnDef::new(FormattingJob::RawBody).text().not_null())
        .col(
            ColumnDef::new(FormattingJob::Status)
                .string()
                .not_null()
                .string_len(25),
        )
        .col(
            ColumnDef::new(FormattingJob::Attempts)
                .integer()
                .not_null()
                .default(0),
        )
        .col(ColumnDef::new(FormattingJob::Error).text().null())
        .col(ColumnDef::new(FormattingJob::FormattedBody).json_binary().null())
        .col(
            ColumnDef::new(FormattingJob::QueuedAt)
                .big_integer()
                .not_null(),
        )
        .col(ColumnDef::new(FormattingJob::StartedAt).big_integer().null())
        .col(ColumnDef::new(FormattingJob::FinishedAt).big_integer().null())
        .to_owned()
}

fn down_statement() -> TableDropStatement {
    Table::drop().table(FormattingJob::Table).to_owned()
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
