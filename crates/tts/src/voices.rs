use indexmap::IndexMap;

use crate::{engine::SpeakerId, types::ModelDescriptor};

/// Voice tried when the requested one is unknown
pub const FALLBACK_VOICE: &str = "EN-BR";

/// Speaker used when even the fallback voice is missing
pub const FALLBACK_SPEAKER: SpeakerId = SpeakerId(0);

/// Catalog timestamp, fixed for compatibility with existing clients
const MODEL_CREATED: u64 = 1_677_641_200;
const MODEL_OBJECT: &str = "model";
const MODEL_OWNER: &str = "community";

/// Immutable voice name to speaker mapping
///
/// Both the catalog endpoints and voice resolution read this one table,
/// so what is advertised is exactly what resolves.
#[derive(Debug, Clone)]
pub struct VoiceDirectory {
    voices: IndexMap<String, SpeakerId>,
}

impl VoiceDirectory {
    pub fn new(voices: IndexMap<String, SpeakerId>) -> Self {
        Self { voices }
    }

    /// Exact, case-sensitive lookup
    pub fn resolve(&self, name: &str) -> Option<SpeakerId> {
        self.voices.get(name).copied()
    }

    /// Resolve `requested`, degrading to the fallback voice, then speaker 0
    pub fn resolve_or_fallback(&self, requested: &str) -> SpeakerId {
        if let Some(speaker_id) = self.resolve(requested) {
            return speaker_id;
        }

        tracing::warn!("Voice '{requested}' not found, falling back to '{FALLBACK_VOICE}'");

        self.resolve(FALLBACK_VOICE).unwrap_or(FALLBACK_SPEAKER)
    }

    /// Voice names in table order
    pub fn list_voices(&self) -> Vec<String> {
        self.voices.keys().cloned().collect()
    }

    /// One model descriptor per voice, in table order
    pub fn list_models(&self) -> Vec<ModelDescriptor> {
        self.voices
            .keys()
            .map(|id| ModelDescriptor {
                id: id.clone(),
                object: MODEL_OBJECT,
                created: MODEL_CREATED,
                owned_by: MODEL_OWNER,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }
}
