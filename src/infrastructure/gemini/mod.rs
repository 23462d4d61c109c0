pub mod client;

pub use client::{
    GeminiClient, GeminiError, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    SpeakerVoiceConfig, SpeechConfig, VoiceConfig, GEMINI_DEFAULT_BASE_URL,
};
