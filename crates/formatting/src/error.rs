use thiserror::Error;

pub type FormattingResult<T> = Result<T, FormattingError>;

#[derive(Error, Debug)]
pub enum FormattingError {
    #[error("Recipe has no recognizable ingredient lines")]
    EmptyRecipe,

    #[error("Job not found")]
    JobNotFound,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Scheduler error: {0}")]
    Scheduler(#[from] tokio_cron_scheduler::JobSchedulerError),

    #[error("{0}")]
    Unknown(#[from] anyhow::Error),
}
