use serde::Deserialize;

/// Logging configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TelemetryConfig {
    /// Service name attached to the startup log line
    #[serde(default = "default_service_name")]
    pub service_name: String,
    /// Log output configuration
    #[serde(default)]
    pub logs: LogsConfig,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            logs: LogsConfig::default(),
        }
    }
}

/// Log output configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogsConfig {
    /// Output format
    #[serde(default)]
    pub format: LogFormat,
    /// `EnvFilter` directive, e.g. `info,tts=debug`
    #[serde(default)]
    pub filter: Option<String>,
}

/// Log line format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

fn default_service_name() -> String {
    "voxgate".to_string()
}
