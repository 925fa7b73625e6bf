use serde::{Deserialize, Serialize};

/// Voice used when a request does not name one
pub const DEFAULT_VOICE: &str = "EN-BR";

/// Model name reported when a request does not name one
pub const DEFAULT_MODEL: &str = "melo-tts-english-us";

/// Speed used when a request does not set one
pub const DEFAULT_SPEED: f64 = 0.9;

/// Media type of every synthesized response
pub const AUDIO_MPEG: &str = "audio/mpeg";

/// Speech synthesis request following the `OpenAI` TTS API format
///
/// Unknown fields such as `response_format` are accepted and ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechRequest {
    /// Text to synthesize; a missing field is treated as empty
    #[serde(default)]
    pub input: String,
    /// Voice name from the catalog
    #[serde(default = "default_voice")]
    pub voice: String,
    /// Advisory model name, never used to pick an engine
    #[serde(default = "default_model")]
    pub model: String,
    /// Speech speed multiplier
    #[serde(default = "default_speed")]
    pub speed: f64,
}

impl SpeechRequest {
    /// Request for `input` with every other field defaulted
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            voice: default_voice(),
            model: default_model(),
            speed: DEFAULT_SPEED,
        }
    }
}

fn default_voice() -> String {
    DEFAULT_VOICE.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

const fn default_speed() -> f64 {
    DEFAULT_SPEED
}

/// Synthesized audio owned by a single request
#[derive(Debug)]
pub struct SpeechResponse {
    /// Encoded audio bytes
    pub audio: Vec<u8>,
    /// Content type of the audio
    pub content_type: &'static str,
}

impl SpeechResponse {
    /// Convert the speech response into an axum HTTP response
    pub fn into_response(self) -> axum::response::Response {
        use axum::response::IntoResponse;

        ([(http::header::CONTENT_TYPE, self.content_type)], self.audio).into_response()
    }
}

/// One entry of the model catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelDescriptor {
    pub id: String,
    pub object: &'static str,
    pub created: u64,
    pub owned_by: &'static str,
}

/// Response body of `GET /v1/models`
#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub data: Vec<ModelDescriptor>,
    pub object: &'static str,
}

/// Response body of `GET /v1/audio/voices`
#[derive(Debug, Serialize)]
pub struct VoicesResponse {
    pub voices: Vec<String>,
}
