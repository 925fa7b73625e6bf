use std::{path::PathBuf, sync::Arc};

use crate::{
    engine::{SpeechEngine, command::CommandEngine},
    error::TtsError,
    invoker::SynthesisInvoker,
    types::{AUDIO_MPEG, ModelsResponse, SpeechRequest, SpeechResponse, VoicesResponse},
    voices::VoiceDirectory,
};

/// Speech gateway: validates requests, resolves voices, invokes the engine
pub struct Server {
    directory: VoiceDirectory,
    invoker: SynthesisInvoker,
}

impl Server {
    /// Build a gateway around an already loaded engine
    ///
    /// The voice directory is read from the engine's speaker table here and
    /// never changes afterwards.
    pub fn new(engine: Arc<dyn SpeechEngine>, temp_dir: Option<PathBuf>) -> Self {
        let directory = VoiceDirectory::new(engine.speakers().clone());
        let invoker = SynthesisInvoker::new(engine, temp_dir);

        Self { directory, invoker }
    }

    /// Synthesize `request.input` as MP3 audio
    ///
    /// Validation failures are returned before the engine is touched. An
    /// unknown voice is not an error, it falls back to a default speaker.
    pub async fn synthesize(&self, request: SpeechRequest) -> crate::error::Result<SpeechResponse> {
        validate(&request)?;

        let speaker_id = self.directory.resolve_or_fallback(&request.voice);

        tracing::debug!(
            model = %request.model,
            voice = %request.voice,
            speaker_id = %speaker_id,
            speed = request.speed,
            input_len = request.input.len(),
            "synthesizing speech"
        );

        let audio = self
            .invoker
            .synthesize(&request.input, speaker_id, request.speed)
            .await?;

        Ok(SpeechResponse {
            audio,
            content_type: AUDIO_MPEG,
        })
    }

    /// Catalog of models, one per voice
    pub fn list_models(&self) -> ModelsResponse {
        ModelsResponse {
            data: self.directory.list_models(),
            object: "list",
        }
    }

    /// Catalog of voice names
    pub fn list_voices(&self) -> VoicesResponse {
        VoicesResponse {
            voices: self.directory.list_voices(),
        }
    }

    pub const fn directory(&self) -> &VoiceDirectory {
        &self.directory
    }
}

fn validate(request: &SpeechRequest) -> crate::error::Result<()> {
    if request.input.is_empty() {
        return Err(TtsError::InvalidRequest("Input text is required.".to_string()));
    }

    if request.voice.is_empty() {
        return Err(TtsError::InvalidRequest("Voice is required.".to_string()));
    }

    if !request.speed.is_finite() || request.speed <= 0.0 {
        return Err(TtsError::InvalidRequest("Speed must be a positive number.".to_string()));
    }

    Ok(())
}

/// Builder for constructing the speech gateway from configuration
pub struct TtsServerBuilder<'a> {
    config: &'a voxgate_config::Config,
    engine: Option<Arc<dyn SpeechEngine>>,
}

impl<'a> TtsServerBuilder<'a> {
    pub const fn new(config: &'a voxgate_config::Config) -> Self {
        Self { config, engine: None }
    }

    /// Use `engine` instead of spawning the configured program
    #[must_use]
    pub fn engine(mut self, engine: Arc<dyn SpeechEngine>) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn build(self) -> crate::error::Result<Server> {
        let engine = match self.engine {
            Some(engine) => engine,
            None => Arc::new(CommandEngine::from_config(&self.config.engine)?),
        };

        let server = Server::new(engine, self.config.engine.temp_dir.clone());

        if server.directory().is_empty() {
            return Err(TtsError::ConfigError("engine reports no speakers".to_string()));
        }

        tracing::debug!("TTS server initialized with {} voice(s)", server.directory().len());

        Ok(server)
    }
}
