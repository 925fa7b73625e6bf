use std::{path::Path, process::Stdio, sync::OnceLock};

use anyhow::Context;
use async_trait::async_trait;
use indexmap::IndexMap;
use regex::{Captures, Regex};
use serde::Deserialize;
use tokio::process::Command;
use voxgate_config::EngineConfig;

use super::{RenderRequest, SpeakerId, SpeechEngine};
use crate::error::TtsError;

/// Speaker table of the English `MeloTTS` checkpoint
const DEFAULT_SPEAKERS: [(&str, u32); 5] = [
    ("EN-US", 0),
    ("EN-BR", 1),
    ("EN_INDIA", 2),
    ("EN-AU", 3),
    ("EN-Default", 4),
];

/// Engine that runs an external program once per render
///
/// The program is spawned directly, without a shell, so request text is
/// always a single argument and never interpreted.
#[derive(Debug)]
pub struct CommandEngine {
    program: String,
    args: Vec<String>,
    language: String,
    device: String,
    speakers: IndexMap<String, SpeakerId>,
}

impl CommandEngine {
    /// Build the engine and read its speaker table
    pub fn from_config(config: &EngineConfig) -> crate::error::Result<Self> {
        let speakers = load_speakers(config)?;

        tracing::debug!(
            program = %config.program,
            speakers = speakers.len(),
            "command engine configured"
        );

        Ok(Self {
            program: config.program.clone(),
            args: config.args.clone(),
            language: config.language.clone(),
            device: config.device.clone(),
            speakers,
        })
    }

    /// Expand every argument template for one render
    fn expand_args(&self, request: &RenderRequest<'_>) -> Vec<String> {
        let speaker_id = request.speaker_id.to_string();
        let output = request.output.to_string_lossy();
        let speed = request.speed.to_string();

        self.args
            .iter()
            .map(|template| {
                placeholder()
                    .replace_all(template, |caps: &Captures<'_>| match &caps[1] {
                        "text" => request.text.to_string(),
                        "speaker_id" => speaker_id.clone(),
                        "output" => output.to_string(),
                        "speed" => speed.clone(),
                        "language" => self.language.clone(),
                        "device" => self.device.clone(),
                        _ => caps[0].to_string(),
                    })
                    .into_owned()
            })
            .collect()
    }
}

#[async_trait]
impl SpeechEngine for CommandEngine {
    fn speakers(&self) -> &IndexMap<String, SpeakerId> {
        &self.speakers
    }

    async fn render(&self, request: RenderRequest<'_>) -> anyhow::Result<()> {
        let args = self.expand_args(&request);

        tracing::debug!(
            program = %self.program,
            speaker_id = %request.speaker_id,
            input_len = request.text.len(),
            "spawning engine"
        );

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .with_context(|| format!("failed to start engine program `{}`", self.program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();

            if stderr.is_empty() {
                anyhow::bail!("engine exited with {}", output.status);
            }
            anyhow::bail!("engine exited with {}: {stderr}", output.status);
        }

        Ok(())
    }
}

fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{(text|speaker_id|output|speed|language|device)\}").expect("must be valid regex"))
}

#[derive(Deserialize)]
struct ModelConfigFile {
    data: ModelConfigData,
}

#[derive(Deserialize)]
struct ModelConfigData {
    spk2id: IndexMap<String, u32>,
}

/// Read the speaker table once, at construction
fn load_speakers(config: &EngineConfig) -> crate::error::Result<IndexMap<String, SpeakerId>> {
    if let Some(ref speakers) = config.speakers {
        return Ok(speakers.iter().map(|(name, id)| (name.clone(), SpeakerId(*id))).collect());
    }

    if let Some(ref path) = config.model_config {
        return read_model_config(path);
    }

    Ok(DEFAULT_SPEAKERS
        .iter()
        .map(|&(name, id)| (name.to_string(), SpeakerId(id)))
        .collect())
}

fn read_model_config(path: &Path) -> crate::error::Result<IndexMap<String, SpeakerId>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| TtsError::ConfigError(format!("failed to read model config {}: {e}", path.display())))?;

    let parsed: ModelConfigFile = serde_json::from_str(&raw)
        .map_err(|e| TtsError::ConfigError(format!("invalid model config {}: {e}", path.display())))?;

    if parsed.data.spk2id.is_empty() {
        return Err(TtsError::ConfigError(format!(
            "model config {} has an empty speaker table",
            path.display()
        )));
    }

    Ok(parsed
        .data
        .spk2id
        .into_iter()
        .map(|(name, id)| (name, SpeakerId(id)))
        .collect())
}
