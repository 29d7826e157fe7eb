use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;

use stockpot_formatting::Queue;

use crate::config::Config;

#[derive(Subcommand)]
pub enum QueueCommands {
    /// Print queue counts and health
    Status,
    /// Stop handing out jobs; running jobs finish
    Pause,
    /// Start handing out jobs again
    Resume,
    /// Queue a scraped recipe, reading the raw body from a file
    Enqueue {
        title: String,
        source_url: String,
        file: PathBuf,
    },
    /// Requeue every failed job with a clean slate
    RetryFailed,
}

pub async fn run(config: Config, command: QueueCommands) -> Result<()> {
    let write_db = crate::db::create_write_pool(&config.database.url).await?;
    let read_db =
        crate::db::create_read_pool(&config.database.url, config.database.max_connections).await?;
    let queue = Queue::new(write_db, read_db);

    match command {
        QueueCommands::Status => {
            let stats = queue.stats(config.worker.stuck_after()).await?;

            println!("queued:     {}", stats.queued);
            println!("processing: {}", stats.processing);
            println!("formatted:  {}", stats.formatted);
            println!("failed:     {}", stats.failed);
            println!("stuck:      {}", stats.stuck);
            println!("paused:     {}", if stats.paused { "yes" } else { "no" });
            match stats.oldest_queued_age_secs {
                Some(age) => println!("oldest queued: {age}s ago"),
                None => println!("oldest queued: none"),
            }
            println!(
                "health:     {}",
                if stats.is_healthy() {
                    "ok"
                } else {
                    "attention needed"
                }
            );
        }
        QueueCommands::Pause => {
            queue.pause().await?;
            println!("queue paused");
        }
        QueueCommands::Resume => {
            queue.resume().await?;
            println!("queue resumed");
        }
        QueueCommands::Enqueue {
            title,
            source_url,
            file,
        } => {
            let raw_body = std::fs::read_to_string(&file)?;
            let id = queue.enqueue(&title, &source_url, &raw_body).await?;
            println!("{id}");
        }
        QueueCommands::RetryFailed => {
            let retried = queue.retry_failed().await?;
            println!("requeued {retried} failed jobs");
        }
    }

    Ok(())
}
