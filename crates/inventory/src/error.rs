use thiserror::Error;

pub type InventoryResult<T> = Result<T, InventoryError>;

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Ingredient not found")]
    NotFound,

    #[error("An ingredient named \"{0}\" already exists")]
    DuplicateName(String),

    #[error("Insufficient stock: {available} available, {requested} requested")]
    InsufficientStock { available: f64, requested: f64 },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Unknown(#[from] anyhow::Error),
}
