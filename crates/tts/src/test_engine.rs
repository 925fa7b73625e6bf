use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use indexmap::IndexMap;

use crate::engine::{RenderRequest, SpeakerId, SpeechEngine};

pub const FAKE_MP3: &[u8] = b"ID3\x04\x00\x00\x00\x00\x00\x00fake-frames";

#[derive(Debug, Clone)]
pub enum Behavior {
    Write(Vec<u8>),
    Fail(String),
    WriteThenFail(String),
    RemoveOutput,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Render {
    pub text: String,
    pub speaker_id: SpeakerId,
    pub speed: f64,
    pub output: PathBuf,
}

/// In-memory engine that records every render
pub struct FakeEngine {
    speakers: IndexMap<String, SpeakerId>,
    behavior: Behavior,
    renders: Mutex<Vec<Render>>,
}

impl FakeEngine {
    pub fn new(behavior: Behavior) -> Arc<Self> {
        Self::with_speakers(
            [("EN-US", 0), ("EN-BR", 1), ("EN_INDIA", 2), ("EN-AU", 3), ("EN-Default", 4)],
            behavior,
        )
    }

    pub fn with_speakers<const N: usize>(speakers: [(&str, u32); N], behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            speakers: speakers
                .into_iter()
                .map(|(name, id)| (name.to_string(), SpeakerId(id)))
                .collect(),
            behavior,
            renders: Mutex::new(Vec::new()),
        })
    }

    pub fn renders(&self) -> Vec<Render> {
        self.renders.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechEngine for FakeEngine {
    fn speakers(&self) -> &IndexMap<String, SpeakerId> {
        &self.speakers
    }

    async fn render(&self, request: RenderRequest<'_>) -> anyhow::Result<()> {
        self.renders.lock().unwrap().push(Render {
            text: request.text.to_string(),
            speaker_id: request.speaker_id,
            speed: request.speed,
            output: request.output.to_path_buf(),
        });

        assert!(request.output.exists(), "output file must exist before rendering");

        match &self.behavior {
            Behavior::Write(audio) => {
                tokio::fs::write(request.output, audio).await?;
                Ok(())
            }
            Behavior::Fail(message) => Err(anyhow::anyhow!("{message}")),
            Behavior::WriteThenFail(message) => {
                tokio::fs::write(request.output, FAKE_MP3).await?;
                Err(anyhow::anyhow!("{message}"))
            }
            Behavior::RemoveOutput => {
                tokio::fs::remove_file(request.output).await?;
                Ok(())
            }
        }
    }
}
