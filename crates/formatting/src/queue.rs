use sea_query::{Expr, ExprTrait, OnConflict, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqlitePool;
use std::time::Duration;

use stockpot_db::table::{FormattingJob, QueueControl};

use crate::error::{FormattingError, FormattingResult};
use crate::job::{FormattedRecipe, JobRow, JobStatus};

const CONTROL_NAME: &str = "formatting";

/// Persistent formatting queue backed by the `formatting_job` table.
///
/// Claims run inside a transaction on the single-writer pool, so two
/// workers can never hand out the same job.
#[derive(Clone)]
pub struct Queue {
    write_db: SqlitePool,
    read_db: SqlitePool,
}

/// Counts from one [`Queue::sweep_stuck`] pass.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub requeued: u64,
    pub failed: u64,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct QueueStats {
    pub queued: i64,
    pub processing: i64,
    pub formatted: i64,
    pub failed: i64,
    pub stuck: i64,
    pub paused: bool,
    pub oldest_queued_age_secs: Option<i64>,
}

impl QueueStats {
    pub fn is_healthy(&self) -> bool {
        !self.paused && self.stuck == 0
    }
}

fn base_select() -> sea_query::SelectStatement {
    Query::select()
        .columns([
            FormattingJob::Id,
            FormattingJob::Title,
            FormattingJob::SourceUrl,
            FormattingJob::RawBody,
            FormattingJob::Status,
            FormattingJob::Attempts,
            FormattingJob::Error,
            FormattingJob::FormattedBody,
            FormattingJob::QueuedAt,
            FormattingJob::StartedAt,
            FormattingJob::FinishedAt,
        ])
        .from(FormattingJob::Table)
        .to_owned()
}

impl Queue {
    pub fn new(write_db: SqlitePool, read_db: SqlitePool) -> Self {
        Self { write_db, read_db }
    }

    pub async fn enqueue(
        &self,
        title: &str,
        source_url: &str,
        raw_body: &str,
    ) -> FormattingResult<String> {
        let id = ulid::Ulid::new().to_string();
        let now = time::OffsetDateTime::now_utc().unix_timestamp();

        let statement = Query::insert()
            .into_table(FormattingJob::Table)
            .columns([
                FormattingJob::Id,
                FormattingJob::Title,
                FormattingJob::SourceUrl,
                FormattingJob::RawBody,
                FormattingJob::Status,
                FormattingJob::QueuedAt,
            ])
            .values_panic([
                id.clone().into(),
                title.into(),
                source_url.into(),
                raw_body.into(),
                JobStatus::Queued.to_string().into(),
                now.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        tracing::info!(job = %id, title, "formatting job queued");

        Ok(id)
    }

    /// Hand out the oldest queued job, marking it `Processing` and
    /// bumping its attempt counter. Returns `None` when the queue is
    /// paused or empty.
    pub async fn claim_next(&self) -> FormattingResult<Option<JobRow>> {
        if self.is_paused().await? {
            return Ok(None);
        }

        let mut tx = self.write_db.begin().await?;

        let statement = base_select()
            .and_where(Expr::col(FormattingJob::Status).eq(JobStatus::Queued.to_string()))
            .order_by(FormattingJob::QueuedAt, Order::Asc)
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let Some(mut job) = sqlx::query_as_with::<_, JobRow, _>(&sql, values)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let now = time::OffsetDateTime::now_utc().unix_timestamp();
        let attempts = job.attempts + 1;

        let statement = Query::update()
            .table(FormattingJob::Table)
            .values([
                (
                    FormattingJob::Status,
                    JobStatus::Processing.to_string().into(),
                ),
                (FormattingJob::StartedAt, now.into()),
                (FormattingJob::Attempts, attempts.into()),
            ])
            .and_where(Expr::col(FormattingJob::Id).eq(&job.id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        tx.commit().await?;

        job.status = sqlx::types::Text(JobStatus::Processing);
        job.attempts = attempts;
        job.started_at = Some(now);

        tracing::info!(job = %job.id, attempt = attempts, "formatting job claimed");

        Ok(Some(job))
    }

    pub async fn complete(&self, id: &str, recipe: &FormattedRecipe) -> FormattingResult<()> {
        let body = serde_json::to_string(recipe)?;
        let now = time::OffsetDateTime::now_utc().unix_timestamp();

        let statement = Query::update()
            .table(FormattingJob::Table)
            .values([
                (
                    FormattingJob::Status,
                    JobStatus::Formatted.to_string().into(),
                ),
                (FormattingJob::FormattedBody, body.into()),
                (FormattingJob::Error, Expr::value(None::<String>)),
                (FormattingJob::FinishedAt, now.into()),
            ])
            .and_where(Expr::col(FormattingJob::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(FormattingError::JobNotFound);
        }

        tracing::info!(job = %id, "formatting job completed");

        Ok(())
    }

    pub async fn fail(&self, id: &str, message: &str) -> FormattingResult<()> {
        let now = time::OffsetDateTime::now_utc().unix_timestamp();

        let statement = Query::update()
            .table(FormattingJob::Table)
            .values([
                (FormattingJob::Status, JobStatus::Failed.to_string().into()),
                (FormattingJob::Error, message.into()),
                (FormattingJob::FinishedAt, now.into()),
            ])
            .and_where(Expr::col(FormattingJob::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(FormattingError::JobNotFound);
        }

        tracing::warn!(job = %id, error = message, "formatting job failed");

        Ok(())
    }

    pub async fn pause(&self) -> FormattingResult<()> {
        self.set_paused(true).await
    }

    pub async fn resume(&self) -> FormattingResult<()> {
        self.set_paused(false).await
    }

    pub async fn is_paused(&self) -> FormattingResult<bool> {
        let statement = Query::select()
            .column(QueueControl::Paused)
            .from(QueueControl::Table)
            .and_where(Expr::col(QueueControl::Name).eq(CONTROL_NAME))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let paused = sqlx::query_scalar_with::<_, bool, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?;

        Ok(paused.unwrap_or(false))
    }

    /// Put jobs stuck in `Processing` longer than `stuck_after` back in
    /// line, or fail them outright once they have burned `max_attempts`.
    pub async fn sweep_stuck(
        &self,
        stuck_after: Duration,
        max_attempts: i64,
    ) -> FormattingResult<SweepReport> {
        let now = time::OffsetDateTime::now_utc().unix_timestamp();
        let cutoff = now - stuck_after.as_secs() as i64;

        // Fail the maxed-out jobs first so the requeue pass below
        // cannot pick them up again.
        let statement = Query::update()
            .table(FormattingJob::Table)
            .values([
                (FormattingJob::Status, JobStatus::Failed.to_string().into()),
                (
                    FormattingJob::Error,
                    format!("Gave up after {max_attempts} attempts").into(),
                ),
                (FormattingJob::FinishedAt, now.into()),
            ])
            .and_where(Expr::col(FormattingJob::Status).eq(JobStatus::Processing.to_string()))
            .and_where(Expr::col(FormattingJob::StartedAt).lte(cutoff))
            .and_where(Expr::col(FormattingJob::Attempts).gte(max_attempts))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let failed = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?
            .rows_affected();

        let statement = Query::update()
            .table(FormattingJob::Table)
            .values([
                (FormattingJob::Status, JobStatus::Queued.to_string().into()),
                (FormattingJob::StartedAt, Expr::value(None::<i64>)),
            ])
            .and_where(Expr::col(FormattingJob::Status).eq(JobStatus::Processing.to_string()))
            .and_where(Expr::col(FormattingJob::StartedAt).lte(cutoff))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let requeued = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?
            .rows_affected();

        if requeued > 0 || failed > 0 {
            tracing::warn!(requeued, failed, "stuck formatting jobs swept");
        }

        Ok(SweepReport { requeued, failed })
    }

    /// Requeue every failed job with a clean slate.
    pub async fn retry_failed(&self) -> FormattingResult<u64> {
        let statement = Query::update()
            .table(FormattingJob::Table)
            .values([
                (FormattingJob::Status, JobStatus::Queued.to_string().into()),
                (FormattingJob::Error, Expr::value(None::<String>)),
                (FormattingJob::StartedAt, Expr::value(None::<i64>)),
                (FormattingJob::FinishedAt, Expr::value(None::<i64>)),
                (FormattingJob::Attempts, 0.into()),
            ])
            .and_where(Expr::col(FormattingJob::Status).eq(JobStatus::Failed.to_string()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let retried = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?
            .rows_affected();

        if retried > 0 {
            tracing::info!(retried, "failed formatting jobs requeued");
        }

        Ok(retried)
    }

    pub async fn stats(&self, stuck_after: Duration) -> FormattingResult<QueueStats> {
        let now = time::OffsetDateTime::now_utc().unix_timestamp();
        let cutoff = now - stuck_after.as_secs() as i64;
        let mut stats = QueueStats::default();

        let statement = Query::select()
            .column(FormattingJob::Status)
            .expr(Expr::col(FormattingJob::Id).count())
            .from(FormattingJob::Table)
            .group_by_col(FormattingJob::Status)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, (String, i64), _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        for (status, count) in rows {
            match status.parse::<JobStatus>() {
                Ok(JobStatus::Queued) => stats.queued = count,
                Ok(JobStatus::Processing) => stats.processing = count,
                Ok(JobStatus::Formatted) => stats.formatted = count,
                Ok(JobStatus::Failed) => stats.failed = count,
                Err(_) => tracing::warn!(status = %status, "unknown status in formatting queue"),
            }
        }

        let statement = Query::select()
            .expr(Expr::col(FormattingJob::Id).count())
            .from(FormattingJob::Table)
            .and_where(Expr::col(FormattingJob::Status).eq(JobStatus::Processing.to_string()))
            .and_where(Expr::col(FormattingJob::StartedAt).lte(cutoff))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        stats.stuck = sqlx::query_scalar_with::<_, i64, _>(&sql, values)
            .fetch_one(&self.read_db)
            .await?;

        let statement = Query::select()
            .expr(Expr::col(FormattingJob::QueuedAt).min())
            .from(FormattingJob::Table)
            .and_where(Expr::col(FormattingJob::Status).eq(JobStatus::Queued.to_string()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let oldest = sqlx::query_scalar_with::<_, Option<i64>, _>(&sql, values)
            .fetch_one(&self.read_db)
            .await?;

        stats.oldest_queued_age_secs = oldest.map(|queued_at| now - queued_at);
        stats.paused = self.is_paused().await?;

        Ok(stats)
    }

    pub async fn find(&self, id: &str) -> FormattingResult<Option<JobRow>> {
        let statement = base_select()
            .and_where(Expr::col(FormattingJob::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let job = sqlx::query_as_with::<_, JobRow, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?;

        Ok(job)
    }

    async fn set_paused(&self, paused: bool) -> FormattingResult<()> {
        let now = time::OffsetDateTime::now_utc().unix_timestamp();

        let statement = Query::insert()
            .into_table(QueueControl::Table)
            .columns([
                QueueControl::Name,
                QueueControl::Paused,
                QueueControl::UpdatedAt,
            ])
            .values_panic([CONTROL_NAME.into(), paused.into(), now.into()])
            .on_conflict(
                OnConflict::column(QueueControl::Name)
                    .update_columns([QueueControl::Paused, QueueControl::UpdatedAt])
                    .to_owned(),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        tracing::info!(paused, "formatting queue control updated");

        Ok(())
    }
}
