use std::{sync::Arc, time::Duration};

use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::error::FormattingResult;
use crate::formatter::RecipeFormatter;
use crate::job::JobRow;
use crate::queue::Queue;

/// Tuning for the background formatting worker.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub poll_interval: Duration,
    pub concurrency: usize,
    pub stuck_after: Duration,
    pub max_attempts: i64,
    pub sweep_schedule: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            concurrency: 2,
            stuck_after: Duration::from_secs(300),
            max_attempts: 3,
            sweep_schedule: "0 * * * * *".to_string(),
        }
    }
}

pub struct Worker {
    queue: Queue,
    formatter: Arc<dyn RecipeFormatter>,
    config: WorkerConfig,
}

impl Worker {
    pub fn new(queue: Queue, formatter: Arc<dyn RecipeFormatter>, config: WorkerConfig) -> Self {
        Self {
            queue,
            formatter,
            config,
        }
    }

    /// Claim and format jobs until Ctrl+C, sweeping stuck jobs on the
    /// cron schedule in the background.
    pub async fn run(&self) -> FormattingResult<()> {
        let mut sched = scheduler(self.queue.clone(), &self.config).await?;
        sched.start().await?;

        tracing::info!(
            concurrency = self.config.concurrency,
            poll_interval_secs = self.config.poll_interval.as_secs(),
            "formatting worker started"
        );

        loop {
            let processed = tokio::select! {
                _ = tokio::signal::ctrl_c() => break,
                result = self.process_batch() => match result {
                    Ok(count) => count,
                    Err(err) => {
                        tracing::error!(err = %err, "formatting batch failed");
                        0
                    }
                },
            };

            if processed == 0 {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => break,
                    _ = tokio::time::sleep(self.config.poll_interval) => {}
                }
            }
        }

        tracing::info!("formatting worker stopping");
        sched.shutdown().await?;

        Ok(())
    }

    /// Claim up to `concurrency` jobs and format them in parallel.
    /// Returns how many were claimed.
    pub async fn process_batch(&self) -> FormattingResult<usize> {
        let mut jobs = Vec::with_capacity(self.config.concurrency);
        while jobs.len() < self.config.concurrency {
            match self.queue.claim_next().await? {
                Some(job) => jobs.push(job),
                None => break,
            }
        }

        if jobs.is_empty() {
            return Ok(0);
        }

        let claimed = jobs.len();
        futures::future::join_all(jobs.into_iter().map(|job| self.process_job(job))).await;

        Ok(claimed)
    }

    async fn process_job(&self, job: JobRow) {
        match self.formatter.format(&job.scraped()).await {
            Ok(recipe) => {
                let ingredients = recipe.ingredients.len();
                if let Err(err) = self.queue.complete(&job.id, &recipe).await {
                    tracing::error!(job = %job.id, err = %err, "failed to store formatted recipe");
                    return;
                }
                tracing::info!(job = %job.id, ingredients, "recipe formatted");
            }
            Err(err) => {
                if let Err(err) = self.queue.fail(&job.id, &err.to_string()).await {
                    tracing::error!(job = %job.id, err = %err, "failed to record formatting failure");
                }
            }
        }
    }
}

async fn scheduler(
    queue: Queue,
    config: &WorkerConfig,
) -> Result<JobScheduler, JobSchedulerError> {
    let sched = JobScheduler::new().await?;
    let stuck_after = config.stuck_after;
    let max_attempts = config.max_attempts;

    sched
        .add(Job::new_async(
            config.sweep_schedule.as_str(),
            move |uuid, mut l| {
                let queue = queue.clone();

                Box::pin(async move {
                    if let Err(err) = queue.sweep_stuck(stuck_after, max_attempts).await {
                        tracing::error!(err = %err, "failed to sweep stuck formatting jobs");
                    }

                    if let Err(err) = l.next_tick_for_job(uuid).await {
                        tracing::error!(err = %err, "failed to get next tick for formatting sweep");
                    }
                })
            },
        )?)
        .await?;

    Ok(sched)
}
