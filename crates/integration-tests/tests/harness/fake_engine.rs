//! In-process engine for integration tests

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use indexmap::IndexMap;
use tts::{RenderRequest, SpeakerId, SpeechEngine};

/// Minimal MP3 stand-in: an ID3 header followed by filler
pub const FAKE_MP3: &[u8] = b"ID3\x04\x00\x00\x00\x00\x00\x00voxgate";

/// Engine with the English `MeloTTS` speaker table
pub struct FakeEngine {
    speakers: IndexMap<String, SpeakerId>,
    failure: Option<String>,
    renders: Mutex<Vec<(String, SpeakerId, PathBuf)>>,
}

impl FakeEngine {
    /// Engine that writes [`FAKE_MP3`] for every request
    pub fn working() -> Arc<Self> {
        Arc::new(Self::build(None))
    }

    /// Engine that writes partial output, then fails with `message`
    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self::build(Some(message.to_owned())))
    }

    fn build(failure: Option<String>) -> Self {
        let speakers = [("EN-US", 0), ("EN-BR", 1), ("EN_INDIA", 2), ("EN-AU", 3), ("EN-Default", 4)]
            .into_iter()
            .map(|(name, id)| (name.to_owned(), SpeakerId(id)))
            .collect();

        Self {
            speakers,
            failure,
            renders: Mutex::new(Vec::new()),
        }
    }

    /// Text, speaker and output path of every render so far
    pub fn renders(&self) -> Vec<(String, SpeakerId, PathBuf)> {
        self.renders.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechEngine for FakeEngine {
    fn speakers(&self) -> &IndexMap<String, SpeakerId> {
        &self.speakers
    }

    async fn render(&self, request: RenderRequest<'_>) -> anyhow::Result<()> {
        self.renders.lock().unwrap().push((
            request.text.to_owned(),
            request.speaker_id,
            request.output.to_path_buf(),
        ));

        tokio::fs::write(request.output, FAKE_MP3).await?;

        match self.failure {
            Some(ref message) => anyhow::bail!("{message}"),
            None => Ok(()),
        }
    }
}
