//! Logging setup
//!
//! Installs a `tracing` subscriber for applications embedding the client.
//! `RUST_LOG` takes precedence over the level passed in.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize logging
///
/// # Arguments
/// * `level` - default filter when `RUST_LOG` is unset (e.g. "info", "civic_client=debug")
/// * `json_format` - JSON lines instead of human-readable output
///
/// # Examples
/// ```no_run
/// civic_client::logger::init_logger("debug", false)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    let subscriber = tracing_subscriber::registry().with(env_filter);

    if json_format {
        let layer = fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true);
        subscriber.with(layer).try_init()?;
    } else {
        let layer = fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true);
        subscriber.with(layer).try_init()?;
    }

    Ok(())
}

/// Initialize logging from `CIVIC_LOG_LEVEL` (default "info") and
/// `CIVIC_LOG_JSON` ("1"/"true" for JSON output)
pub fn init_logger_from_env() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let level = std::env::var("CIVIC_LOG_LEVEL").unwrap_or_else(|_| "info".into());
    let json = std::env::var("CIVIC_LOG_JSON")
        .map(|v| matches!(v.as_str(), "1" | "true"))
        .unwrap_or(false);
    init_logger(&level, json)
}
