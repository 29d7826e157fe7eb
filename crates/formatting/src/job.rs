use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Lifecycle of a formatting job.
#[derive(
    EnumString, Display, VariantArray, Default, Clone, Copy, Debug, PartialEq, Eq, AsRefStr,
)]
pub enum JobStatus {
    #[default]
    Queued,
    Processing,
    Formatted,
    Failed,
}

/// A scraped recipe waiting to be formatted.
#[derive(Debug, Clone)]
pub struct ScrapedRecipe {
    pub title: String,
    pub source_url: String,
    pub body: String,
}

/// One parsed ingredient line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub name: String,
    /// The line as scraped, kept for manual review.
    pub raw: String,
}

/// Structured output stored on a formatted job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedRecipe {
    pub title: String,
    pub source_url: String,
    pub ingredients: Vec<RecipeIngredient>,
    pub instructions: Vec<String>,
}

#[derive(Debug, FromRow)]
pub struct JobRow {
    pub id: String,
    pub title: String,
    pub source_url: String,
    pub raw_body: String,
    pub status: sqlx::types::Text<JobStatus>,
    pub attempts: i64,
    pub error: Option<String>,
    pub formatted_body: Option<String>,
    pub queued_at: i64,
    pub started_at: Option<i64>,
    pub finished_at: Option<i64>,
}

impl JobRow {
    pub fn status(&self) -> JobStatus {
        self.status.0
    }

    pub fn scraped(&self) -> ScrapedRecipe {
        ScrapedRecipe {
            title: self.title.clone(),
            source_url: self.source_url.clone(),
            body: self.raw_body.clone(),
        }
    }

    pub fn formatted(&self) -> Result<Option<FormattedRecipe>, serde_json::Error> {
        self.formatted_body
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
    }
}
