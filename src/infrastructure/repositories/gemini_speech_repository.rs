use super::speech_repository::{DialogueSpeechRequest, LineSpeechRequest, SpeechRepository};
use crate::infrastructure::gemini::{
    GeminiClient, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    SpeakerVoiceConfig, SpeechConfig, VoiceConfig,
};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::sync::Arc;

/// Gemini TTS implementation of the speech repository
pub struct GeminiSpeechRepository {
    client: Arc<GeminiClient>,
}

impl GeminiSpeechRepository {
    pub fn new(client: Arc<GeminiClient>) -> Self {
        Self { client }
    }

    async fn call_gemini(
        &self,
        model: &str,
        prompt: &str,
        speech_config: SpeechConfig,
    ) -> Result<Vec<u8>, String> {
        let start_time = std::time::Instant::now();
        let request = GenerateContentRequest::from_prompt(prompt, GenerationConfig::audio(speech_config));

        tracing::info!(
            model = model,
            text_length = prompt.len(),
            text_preview = %prompt.chars().take(200).collect::<String>(),
            "Calling Gemini TTS API"
        );

        let response = self
            .client
            .generate_content(model, &request)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    model = model,
                    text_length = prompt.len(),
                    "Gemini TTS API call failed"
                );
                e.to_string()
            })?;

        let audio = decode_audio(&response)?;

        tracing::info!(
            provider = "gemini",
            model = model,
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = prompt.len(),
            audio_size_bytes = audio.len(),
            "TTS synthesis completed"
        );

        Ok(audio)
    }
}

/// Raw PCM from the first inline payload of a response
fn decode_audio(response: &GenerateContentResponse) -> Result<Vec<u8>, String> {
    let Some(inline) = response.inline_data() else {
        return Err(match response.stop_reason() {
            Some(reason) => format!("no audio in response (reason: {})", reason),
            None => "no audio in response".to_string(),
        });
    };

    tracing::debug!(mime_type = %inline.mime_type, "Gemini audio received");

    STANDARD
        .decode(inline.data.as_bytes())
        .map_err(|e| format!("invalid base64 audio payload: {}", e))
}

#[async_trait]
impl SpeechRepository for GeminiSpeechRepository {
    async fn synthesize_line(&self, request: &LineSpeechRequest) -> Result<Vec<u8>, String> {
        // Gemini follows parenthetical directions, so the persona rides inline
        self.call_gemini(
            request.model.provider_model_id(),
            &request.prompt(),
            SpeechConfig::single(&request.voice_id),
        )
        .await
    }

    async fn synthesize_dialogue(&self, request: &DialogueSpeechRequest) -> Result<Vec<u8>, String> {
        // Multi-speaker config wants at least two speakers; a monologue uses a plain voice.
        let speech_config = match request.speakers.as_slice() {
            [only] => SpeechConfig::single(&only.voice_id),
            speakers => SpeechConfig::multi(
                speakers
                    .iter()
                    .map(|s| SpeakerVoiceConfig {
                        speaker: s.speaker.clone(),
                        voice_config: VoiceConfig::prebuilt(&s.voice_id),
                    })
                    .collect(),
            ),
        };

        tracing::info!(
            model = %request.model,
            speakers = ?request.speakers.iter().map(|s| s.speaker.as_str()).collect::<Vec<_>>(),
            "Starting Gemini multi-speaker synthesis"
        );

        self.call_gemini(request.model.provider_model_id(), &request.script, speech_config)
            .await
    }
}
