use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub worker: WorkerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Settings for the background formatting worker.
#[derive(Debug, Deserialize, Clone)]
pub struct WorkerConfig {
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    #[serde(default = "default_stuck_after_secs")]
    pub stuck_after_secs: u64,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: i64,
    #[serde(default = "default_sweep_schedule")]
    pub sweep_schedule: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            concurrency: default_concurrency(),
            stuck_after_secs: default_stuck_after_secs(),
            max_attempts: default_max_attempts(),
            sweep_schedule: default_sweep_schedule(),
        }
    }
}

impl WorkerConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn stuck_after(&self) -> Duration {
        Duration::from_secs(self.stuck_after_secs)
    }
}

fn default_poll_interval_secs() -> u64 {
    5
}

fn default_concurrency() -> usize {
    2
}

fn default_stuck_after_secs() -> u64 {
    300
}

fn default_max_attempts() -> i64 {
    3
}

fn default_sweep_schedule() -> String {
    "0 * * * * *".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (STOCKPOT__DATABASE__URL, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("database.url", "sqlite:stockpot.db")?
            .set_default("database.max_connections", 5)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("STOCKPOT")
                .separator("__")
                .try_parsing(true),
        );

        // Also support the conventional DATABASE_URL without prefix
        if let Ok(database_url) = env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", database_url)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.database.url.is_empty() {
            return Err("Database url must not be empty".to_string());
        }
        if self.database.max_connections < 1 {
            return Err("Database max_connections must be at least 1".to_string());
        }
        if self.worker.concurrency < 1 {
            return Err("Worker concurrency must be at least 1".to_string());
        }
        if self.worker.max_attempts < 1 {
            return Err("Worker max_attempts must be at least 1".to_string());
        }
        if self.worker.poll_interval_secs < 1 {
            return Err("Worker poll_interval_secs must be at least 1".to_string());
        }
        if self.worker.stuck_after_secs < 1 {
            return Err("Worker stuck_after_secs must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            database: DatabaseConfig {
                url: "sqlite:test.db".to_string(),
                max_connections: 5,
            },
            observability: ObservabilityConfig::default(),
            worker: WorkerConfig::default(),
        }
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_validation_empty_url() {
        let mut config = valid_config();
        config.database.url = String::new();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_connections() {
        let mut config = valid_config();
        config.database.max_connections = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_concurrency() {
        let mut config = valid_config();
        config.worker.concurrency = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_worker_intervals() {
        // A zero poll interval turns the worker loop into a busy poll.
        let mut config = valid_config();
        config.worker.poll_interval_secs = 0;
        assert!(config.validate().is_err());

        // A zero stuck threshold marks every job stuck on claim.
        let mut config = valid_config();
        config.worker.stuck_after_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_worker_durations() {
        let worker = WorkerConfig::default();

        assert_eq!(worker.poll_interval(), Duration::from_secs(5));
        assert_eq!(worker.stuck_after(), Duration::from_secs(300));
        assert_eq!(worker.sweep_schedule, "0 * * * * *");
    }
}
