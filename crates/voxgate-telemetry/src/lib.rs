//! Logging for voxgate
//!
//! Installs a `tracing-subscriber` registry with an env filter and a text or
//! JSON formatting layer

use tracing_subscriber::EnvFilter;
use voxgate_config::{LogFormat, TelemetryConfig};

/// Initialize logging from configuration
///
/// The filter is taken from `RUST_LOG` when set, then from
/// `telemetry.logs.filter`, then from `default_filter`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(config: Option<&TelemetryConfig>, default_filter: &str) -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let configured = config.and_then(|c| c.logs.filter.as_deref());
    let filter = build_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(), configured, default_filter);

    let format = config.map_or(LogFormat::Text, |c| c.logs.format);

    let text_layer = (format == LogFormat::Text).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
    });

    let json_layer = (format == LogFormat::Json).then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(text_layer)
        .with(json_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))?;

    if let Some(config) = config {
        tracing::debug!(service_name = %config.service_name, ?format, "logging initialized");
    }

    Ok(())
}

/// Pick the first directive that parses, falling back to `info`
fn build_filter(from_env: Option<&str>, configured: Option<&str>, default_filter: &str) -> EnvFilter {
    [from_env, configured, Some(default_filter)]
        .into_iter()
        .flatten()
        .find_map(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}
