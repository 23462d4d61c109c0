use super::speech_repository::{LineSpeechRequest, SpeechRepository};
use crate::domain::character::{find_voice, voices_in, VoiceCategory};
use crate::domain::skit::SpeechModel;
use async_openai::{
    config::OpenAIConfig,
    types::{CreateSpeechRequest, SpeechModel as OpenAiSpeechModel, SpeechResponseFormat, Voice},
    Client,
};
use async_trait::async_trait;
use regex::Regex;
use std::sync::{Arc, LazyLock};

/// OpenAI has a limit of 4096 characters per request
const MAX_BATCH_SIZE: usize = 4096;

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.!?]+\s+)").expect("sentence pattern is valid"));

/// OpenAI speech implementation of the speech repository.
///
/// Requests raw PCM, which comes back as 24 kHz 16-bit mono and can be
/// concatenated across batches without re-encoding.
pub struct OpenAiSpeechRepository {
    client: Arc<Client<OpenAIConfig>>,
}

impl OpenAiSpeechRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>) -> Self {
        Self { client }
    }

    /// Call OpenAI speech API to synthesize a single text batch
    async fn call_openai(&self, model: SpeechModel, text: &str, voice: Voice) -> Result<Vec<u8>, String> {
        tracing::info!(
            model = %model,
            voice = ?voice,
            text_length = text.len(),
            text_preview = %text.chars().take(200).collect::<String>(),
            "Calling OpenAI speech API"
        );

        let request = CreateSpeechRequest {
            model: openai_model(model),
            input: text.to_string(),
            voice,
            response_format: Some(SpeechResponseFormat::Pcm),
            speed: None,
        };

        let response = self.client.audio().speech(request).await.map_err(|e| {
            tracing::error!(
                error = %e,
                model = %model,
                text_length = text.len(),
                "OpenAI speech API call failed"
            );
            format!("OpenAI speech error: {}", e)
        })?;

        let audio_bytes = response.bytes.to_vec();
        tracing::debug!(audio_size = audio_bytes.len(), "OpenAI audio received");

        Ok(audio_bytes)
    }
}

fn openai_model(model: SpeechModel) -> OpenAiSpeechModel {
    match model {
        SpeechModel::OpenAiTts1 => OpenAiSpeechModel::Tts1,
        SpeechModel::OpenAiTts1Hd => OpenAiSpeechModel::Tts1Hd,
        other => OpenAiSpeechModel::Other(other.as_str().to_string()),
    }
}

/// Map a catalog voice onto the six OpenAI voices.
///
/// Voices keep their category; within a category they cycle through the
/// OpenAI voices of that category by catalog position, so distinct catalog
/// voices mostly stay distinct.
pub fn openai_voice_for(voice_id: &str) -> Voice {
    let Some(entry) = find_voice(voice_id) else {
        return Voice::Alloy;
    };

    let position = voices_in(entry.category)
        .position(|v| v.id == entry.id)
        .unwrap_or(0);

    match entry.category {
        VoiceCategory::Male => [Voice::Onyx, Voice::Echo, Voice::Fable][position % 3].clone(),
        VoiceCategory::Female => [Voice::Nova, Voice::Shimmer][position % 2].clone(),
        VoiceCategory::Neutral => Voice::Alloy,
    }
}

/// Split text into batches that respect sentence boundaries
/// Each batch is at most MAX_BATCH_SIZE characters
fn split_into_batches(text: &str) -> Vec<String> {
    if text.chars().count() <= MAX_BATCH_SIZE {
        return vec![text.to_string()];
    }

    let mut batches = Vec::new();
    let mut current_batch = String::new();
    let mut last_end = 0;

    for mat in SENTENCE_END.find_iter(text) {
        let sentence = &text[last_end..mat.end()];

        if !current_batch.is_empty() && current_batch.len() + sentence.len() > MAX_BATCH_SIZE {
            batches.push(current_batch.trim().to_string());
            current_batch = String::new();
        }

        if sentence.chars().count() > MAX_BATCH_SIZE {
            push_char_chunks(&mut batches, sentence);
        } else {
            current_batch.push_str(sentence);
        }
        last_end = mat.end();
    }

    if last_end < text.len() {
        let remaining = &text[last_end..];

        if !current_batch.is_empty() && current_batch.len() + remaining.len() > MAX_BATCH_SIZE {
            batches.push(current_batch.trim().to_string());
            current_batch = String::new();
        }

        if remaining.chars().count() > MAX_BATCH_SIZE {
            push_char_chunks(&mut batches, remaining);
        } else {
            current_batch.push_str(remaining);
        }
    }

    if !current_batch.trim().is_empty() {
        batches.push(current_batch.trim().to_string());
    }

    batches
}

/// Speech input for a line. OpenAI speech reads its input verbatim, so the
/// persona never goes in here.
fn line_batches(request: &LineSpeechRequest) -> Vec<String> {
    split_into_batches(&request.text)
}

fn push_char_chunks(batches: &mut Vec<String>, text: &str) {
    let chars: Vec<char> = text.chars().collect();
    for chunk in chars.chunks(MAX_BATCH_SIZE) {
        batches.push(chunk.iter().collect());
    }
}

#[async_trait]
impl SpeechRepository for OpenAiSpeechRepository {
    async fn synthesize_line(&self, request: &LineSpeechRequest) -> Result<Vec<u8>, String> {
        let start_time = std::time::Instant::now();
        let voice = openai_voice_for(&request.voice_id);

        let batches = line_batches(request);
        tracing::debug!(
            voice_id = %request.voice_id,
            openai_voice = ?voice,
            batch_count = batches.len(),
            persona_dropped = request.persona.is_some(),
            "Starting OpenAI line synthesis"
        );

        let mut audio = Vec::new();
        for batch in &batches {
            let chunk = self.call_openai(request.model, batch, voice.clone()).await?;
            audio.extend(chunk);
        }

        let duration = start_time.elapsed();
        let characters_count = request.text.len();
        let throughput_chars_per_sec = if duration.as_secs_f64() > 0.0 {
            characters_count as f64 / duration.as_secs_f64()
        } else {
            0.0
        };

        tracing::info!(
            provider = "openai",
            model = %request.model,
            voice = ?voice,
            latency_ms = duration.as_millis(),
            characters_count = characters_count,
            batch_count = batches.len(),
            audio_size_bytes = audio.len(),
            throughput_chars_per_sec = format!("{:.2}", throughput_chars_per_sec),
            "TTS synthesis completed"
        );

        Ok(audio)
    }
}
