pub mod command;

use std::{fmt, path::Path};

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Speaker identifier understood only by the inference engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeakerId(pub u32);

impl fmt::Display for SpeakerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single render job handed to the engine
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    /// Text to speak
    pub text: &'a str,
    /// Resolved speaker
    pub speaker_id: SpeakerId,
    /// File the engine must write encoded audio to
    pub output: &'a Path,
    /// Speed multiplier
    pub speed: f64,
}

/// Text-to-speech inference engine
///
/// The engine only knows how to write encoded audio to a file path; reading
/// the result back and cleaning up is the caller's job.
#[async_trait]
pub trait SpeechEngine: Send + Sync {
    /// Speaker table, voice name to speaker id, in listing order
    fn speakers(&self) -> &IndexMap<String, SpeakerId>;

    /// Render `request.text` as encoded audio into `request.output`
    async fn render(&self, request: RenderRequest<'_>) -> anyhow::Result<()>;
}
