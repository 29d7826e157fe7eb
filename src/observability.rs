use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize tracing for the process: JSON output when
/// `ENVIRONMENT=production`, a developer console layout otherwise.
/// `RUST_LOG` wins over the configured level.
pub fn init_observability(service_name: &str, service_version: &str, log_level: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let registry = tracing_subscriber::registry();
    match std::env::var("ENVIRONMENT").as_deref() {
        Ok("production") => registry
            .with(fmt::layer().json().with_filter(env_filter))
            .try_init()?,
        _ => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_line_number(true)
                    .with_filter(env_filter),
            )
            .try_init()?,
    }

    tracing::info!(
        service.name = service_name,
        service.version = service_version,
        "observability initialized"
    );

    Ok(())
}
