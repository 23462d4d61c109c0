use crate::domain::skit::SpeechModel;
use async_trait::async_trait;

/// One cue rendered with a single voice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSpeechRequest {
    pub model: SpeechModel,
    pub voice_id: String,
    pub speaker: String,
    /// Dialogue as written in the script
    pub text: String,
    /// Delivery hint for the voice. Never part of the spoken text.
    pub persona: Option<String>,
}

impl LineSpeechRequest {
    /// Dialogue with the persona folded in as an inline direction, for
    /// models that read stage directions instead of voicing them
    pub fn prompt(&self) -> String {
        match &self.persona {
            Some(persona) => format!(
                "(Speaking as {}, with persona: {}) {}",
                self.speaker, persona, self.text
            ),
            None => self.text.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakerVoice {
    pub speaker: String,
    pub voice_id: String,
}

/// A whole script rendered in one call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueSpeechRequest {
    pub model: SpeechModel,
    pub script: String,
    pub speakers: Vec<SpeakerVoice>,
}

/// Repository for speech synthesis.
/// Abstracts the underlying provider (Gemini TTS, OpenAI speech, ...)
///
/// Implementations return raw little-endian 16-bit mono PCM at 24 kHz, with
/// no container header. Errors carry the provider's message.
#[async_trait]
pub trait SpeechRepository: Send + Sync {
    /// Synthesize a single line with one voice
    async fn synthesize_line(&self, request: &LineSpeechRequest) -> Result<Vec<u8>, String>;

    /// Synthesize a whole multi-speaker script in one call
    ///
    /// Providers that cannot voice several speakers at once keep the default.
    async fn synthesize_dialogue(&self, request: &DialogueSpeechRequest) -> Result<Vec<u8>, String> {
        Err(format!(
            "model {} does not support multi-speaker synthesis",
            request.model
        ))
    }
}
