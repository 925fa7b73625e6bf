use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Deserialize;

/// Placeholder replaced with the temporary output path when rendering
pub const OUTPUT_PLACEHOLDER: &str = "{output}";

/// Inference engine configuration
///
/// The engine is an external program that renders encoded audio for a
/// piece of text into a file path. Each argument may contain the
/// placeholders `{text}`, `{speaker_id}`, `{output}`, `{speed}`,
/// `{language}` and `{device}`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Program to execute for every synthesis request
    #[serde(default = "default_program")]
    pub program: String,
    /// Argument templates passed to the program
    #[serde(default = "default_args")]
    pub args: Vec<String>,
    /// Engine language, substituted for `{language}`
    #[serde(default = "default_language")]
    pub language: String,
    /// Device the engine runs on, substituted for `{device}`
    #[serde(default = "default_device")]
    pub device: String,
    /// Model configuration file whose `data.spk2id` table lists the speakers
    #[serde(default)]
    pub model_config: Option<PathBuf>,
    /// Explicit speaker table, takes precedence over `model_config`
    #[serde(default)]
    pub speakers: Option<IndexMap<String, u32>>,
    /// Directory for temporary audio files, defaults to the system temp dir
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            language: default_language(),
            device: default_device(),
            model_config: None,
            speakers: None,
            temp_dir: None,
        }
    }
}

fn default_program() -> String {
    "melo-render".to_string()
}

fn default_args() -> Vec<String> {
    [
        "--text",
        "{text}",
        "--speaker-id",
        "{speaker_id}",
        "--output",
        OUTPUT_PLACEHOLDER,
        "--speed",
        "{speed}",
        "--language",
        "{language}",
        "--device",
        "{device}",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

fn default_language() -> String {
    "EN".to_string()
}

fn default_device() -> String {
    "cpu".to_string()
}
