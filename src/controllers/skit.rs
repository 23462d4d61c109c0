use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{
    domain::{
        audio::WAV_MIME_TYPE,
        character::CharacterProfile,
        skit::{DispatchStrategy, SkitAudio, SkitService, SkitServiceApi, SpeechModel},
    },
    error::{AppError, AppResult},
};

/// Voice and persona assigned to one character name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterVoice {
    pub voice: String,
    #[serde(default)]
    pub persona: String,
}

/// Request for POST /api/skits/generate and /api/skits/download
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkitRequest {
    pub script: String,
    #[serde(default)]
    pub character_voices: BTreeMap<String, CharacterVoice>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkitResponse {
    pub audio_data_uri: String,
    pub strategy: DispatchStrategy,
    pub model: SpeechModel,
    pub cue_count: usize,
    pub rendered_cues: usize,
    pub skipped_speakers: Vec<String>,
    pub duration_ms: u64,
}

impl From<SkitAudio> for SkitResponse {
    fn from(skit: SkitAudio) -> Self {
        Self {
            audio_data_uri: skit.audio.to_data_uri(),
            strategy: skit.strategy,
            model: skit.model,
            cue_count: skit.cue_count,
            rendered_cues: skit.rendered_cues,
            skipped_speakers: skit.skipped_speakers,
            duration_ms: skit.audio.duration_ms,
        }
    }
}

/// Character map as sent by the UI, in name order
pub fn profiles_from(character_voices: BTreeMap<String, CharacterVoice>) -> Vec<CharacterProfile> {
    character_voices
        .into_iter()
        .map(|(name, cv)| CharacterProfile::new(name, cv.voice, cv.persona))
        .collect()
}

pub struct SkitController {
    skit_service: Arc<SkitService>,
    default_model: SpeechModel,
}

impl SkitController {
    pub fn new(skit_service: Arc<SkitService>, default_model: SpeechModel) -> Self {
        Self {
            skit_service,
            default_model,
        }
    }

    fn resolve_model(&self, model: Option<&str>) -> AppResult<SpeechModel> {
        match model.map(str::trim).filter(|m| !m.is_empty()) {
            None => Ok(self.default_model),
            Some(id) => id.parse().map_err(AppError::BadRequest),
        }
    }

    async fn render(&self, request: SkitRequest) -> AppResult<SkitAudio> {
        let model = self.resolve_model(request.model.as_deref())?;

        let skit = self
            .skit_service
            .generate_skit(request.script, profiles_from(request.character_voices), model)
            .await?;

        Ok(skit)
    }

    /// POST /api/skits/generate - Render a script and return it as a data URI
    pub async fn generate(
        State(controller): State<Arc<SkitController>>,
        Json(request): Json<SkitRequest>,
    ) -> AppResult<Json<SkitResponse>> {
        let skit = controller.render(request).await?;
        Ok(Json(SkitResponse::from(skit)))
    }

    /// POST /api/skits/download - Render a script and return the WAV file
    pub async fn download(
        State(controller): State<Arc<SkitController>>,
        Json(request): Json<SkitRequest>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let skit = controller.render(request).await?;

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(WAV_MIME_TYPE));
        headers.insert(
            header::CONTENT_DISPOSITION,
            HeaderValue::from_static("attachment; filename=\"skit.wav\""),
        );
        headers.insert("x-cue-count", HeaderValue::from(skit.cue_count));
        headers.insert("x-rendered-cues", HeaderValue::from(skit.rendered_cues));
        headers.insert("x-duration-ms", HeaderValue::from(skit.audio.duration_ms));

        Ok((StatusCode::OK, headers, Body::from(skit.audio.wav_bytes)))
    }
}
