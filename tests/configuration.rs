use std::time::Duration;

use stockpot::Config;
use temp_dir::TempDir;

#[test]
fn loads_defaults_without_a_file() {
    let config = Config::load(None).expect("failed to load config");

    assert_eq!(config.database.url, "sqlite:stockpot.db");
    assert_eq!(config.database.max_connections, 5);
    assert_eq!(config.observability.log_level, "info");
    assert_eq!(config.worker.concurrency, 2);
    assert_eq!(config.worker.poll_interval(), Duration::from_secs(5));
    assert_eq!(config.worker.stuck_after(), Duration::from_secs(300));
}

#[test]
fn config_file_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.child("stockpot.toml");
    std::fs::write(
        &path,
        "[database]\nurl = \"sqlite:other.db\"\nmax_connections = 9\n\n[worker]\nconcurrency = 4\n",
    )
    .unwrap();

    let config = Config::load(Some(path.to_str().unwrap().to_string())).unwrap();

    assert_eq!(config.database.url, "sqlite:other.db");
    assert_eq!(config.database.max_connections, 9);
    assert_eq!(config.worker.concurrency, 4);
    // untouched keys keep their defaults
    assert_eq!(config.worker.max_attempts, 3);
    assert_eq!(config.worker.sweep_schedule, "0 * * * * *");
}

#[test]
fn validation_rejects_degenerate_settings() {
    let mut config = Config::load(None).unwrap();
    assert!(config.validate().is_ok());

    config.database.max_connections = 0;
    assert!(config.validate().is_err());

    let mut config = Config::load(None).unwrap();
    config.worker.concurrency = 0;
    assert!(config.validate().is_err());

    let mut config = Config::load(None).unwrap();
    config.worker.max_attempts = 0;
    assert!(config.validate().is_err());

    let mut config = Config::load(None).unwrap();
    config.worker.poll_interval_secs = 0;
    assert!(config.validate().is_err());

    let mut config = Config::load(None).unwrap();
    config.worker.stuck_after_secs = 0;
    assert!(config.validate().is_err());
}
