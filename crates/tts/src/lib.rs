#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod engine;
mod error;
mod invoker;
mod request;
mod server;
#[cfg(test)]
mod test_engine;
mod types;
mod voices;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

pub use engine::{RenderRequest, SpeakerId, SpeechEngine, command::CommandEngine};
pub use error::{Result, TtsError};
pub use invoker::SynthesisInvoker;
pub use server::{Server, TtsServerBuilder};
pub use types::{
    AUDIO_MPEG, DEFAULT_MODEL, DEFAULT_SPEED, DEFAULT_VOICE, ModelDescriptor, ModelsResponse, SpeechRequest,
    SpeechResponse, VoicesResponse,
};
pub use voices::{FALLBACK_SPEAKER, FALLBACK_VOICE, VoiceDirectory};
use request::ExtractPayload;

/// Build the speech server from configuration, spawning the configured engine
pub fn build_server(config: &voxgate_config::Config) -> anyhow::Result<Arc<Server>> {
    build(TtsServerBuilder::new(config))
}

/// Build the speech server around an already loaded engine
pub fn build_server_with_engine(
    config: &voxgate_config::Config,
    engine: Arc<dyn SpeechEngine>,
) -> anyhow::Result<Arc<Server>> {
    build(TtsServerBuilder::new(config).engine(engine))
}

fn build(builder: TtsServerBuilder<'_>) -> anyhow::Result<Arc<Server>> {
    let server = Arc::new(
        builder
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to initialize TTS server: {e}"))?,
    );
    Ok(server)
}

/// Create the endpoint router for speech and the catalog
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new()
        .route("/v1/audio/speech", post(synthesize))
        .route("/v1/audio/voices", get(list_voices))
        .route("/v1/models", get(list_models))
}

/// Handle speech synthesis requests
async fn synthesize(
    State(server): State<Arc<Server>>,
    ExtractPayload(request): ExtractPayload<SpeechRequest>,
) -> Result<axum::response::Response> {
    tracing::debug!("TTS speech handler called for model: {}", request.model);

    let response = server.synthesize(request).await?;

    tracing::debug!("Speech synthesis complete");

    Ok(response.into_response())
}

async fn list_models(State(server): State<Arc<Server>>) -> Json<ModelsResponse> {
    Json(server.list_models())
}

async fn list_voices(State(server): State<Arc<Server>>) -> Json<VoicesResponse> {
    Json(server.list_voices())
}
