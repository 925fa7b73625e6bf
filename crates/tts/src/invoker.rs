use std::{path::PathBuf, sync::Arc};

use tempfile::NamedTempFile;

use crate::{
    engine::{RenderRequest, SpeakerId, SpeechEngine},
    error::TtsError,
};

/// Bridges the file-based engine to in-memory audio
///
/// Every call gets its own temporary file, which is removed on every exit
/// path before the call returns.
pub struct SynthesisInvoker {
    engine: Arc<dyn SpeechEngine>,
    temp_dir: Option<PathBuf>,
}

impl SynthesisInvoker {
    pub fn new(engine: Arc<dyn SpeechEngine>, temp_dir: Option<PathBuf>) -> Self {
        Self { engine, temp_dir }
    }

    /// Render `text` and return the encoded audio
    pub async fn synthesize(&self, text: &str, speaker_id: SpeakerId, speed: f64) -> crate::error::Result<Vec<u8>> {
        let scratch = self.scratch_file().map_err(|e| {
            tracing::error!(error = ?e, "failed to create temporary audio file");
            TtsError::SynthesisFailed(format!("failed to create temporary audio file: {e}"))
        })?;

        match self.render_and_read(&scratch, text, speaker_id, speed).await {
            Ok(audio) => {
                let path = scratch.path().to_path_buf();
                if let Err(e) = scratch.close() {
                    tracing::warn!(path = %path.display(), "failed to remove temporary audio file: {e}");
                }

                tracing::debug!("Speech synthesis produced {} bytes", audio.len());
                Ok(audio)
            }
            Err(e) => {
                drop(scratch);

                tracing::error!(error = ?e, speaker_id = %speaker_id, "speech synthesis failed");
                Err(TtsError::SynthesisFailed(format!("{e:#}")))
            }
        }
    }

    fn scratch_file(&self) -> std::io::Result<NamedTempFile> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("voxgate-").suffix(".mp3");

        match self.temp_dir {
            Some(ref dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
    }

    async fn render_and_read(
        &self,
        scratch: &NamedTempFile,
        text: &str,
        speaker_id: SpeakerId,
        speed: f64,
    ) -> anyhow::Result<Vec<u8>> {
        use anyhow::Context;

        self.engine
            .render(RenderRequest {
                text,
                speaker_id,
                output: scratch.path(),
                speed,
            })
            .await?;

        let audio = tokio::fs::read(scratch.path())
            .await
            .context("failed to read rendered audio")?;

        if audio.is_empty() {
            tracing::warn!(speaker_id = %speaker_id, "engine rendered an empty audio file");
        }

        Ok(audio)
    }
}
