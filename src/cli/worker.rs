use std::sync::Arc;

use anyhow::Result;

use stockpot_formatting::{Queue, RuleBasedFormatter, Worker, WorkerConfig};

use crate::config::Config;

/// Run the formatting worker until interrupted.
pub async fn run(config: Config) -> Result<()> {
    let write_db = crate::db::create_write_pool(&config.database.url).await?;
    let read_db =
        crate::db::create_read_pool(&config.database.url, config.database.max_connections).await?;

    let queue = Queue::new(write_db, read_db);
    let worker = Worker::new(
        queue,
        Arc::new(RuleBasedFormatter),
        WorkerConfig {
            poll_interval: config.worker.poll_interval(),
            concurrency: config.worker.concurrency,
            stuck_after: config.worker.stuck_after(),
            max_attempts: config.worker.max_attempts,
            sweep_schedule: config.worker.sweep_schedule.clone(),
        },
    );

    worker.run().await?;

    Ok(())
}
