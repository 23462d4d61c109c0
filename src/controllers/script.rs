use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use super::skit::{profiles_from, CharacterVoice};
use crate::{
    domain::{
        drafting::{RosterEntry, ScriptDraftingService, ScriptDraftingServiceApi, TextModel},
        script::SpeechCue,
        skit::{SkitService, SkitServiceApi},
    },
    error::{AppError, AppResult},
};

#[derive(Debug, Serialize, Deserialize)]
pub struct ScriptCharacter {
    pub name: String,
    #[serde(default)]
    pub persona: String,
}

/// Request for POST /api/scripts/generate
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateScriptRequest {
    pub prompt: String,
    #[serde(default)]
    pub characters: Vec<ScriptCharacter>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateScriptResponse {
    pub script: String,
}

/// Request for POST /api/scripts/parse
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseScriptRequest {
    pub script: String,
    #[serde(default)]
    pub character_voices: BTreeMap<String, CharacterVoice>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseScriptResponse {
    pub cues: Vec<SpeechCue>,
    pub speakers: Vec<String>,
    pub unmapped_speakers: Vec<String>,
}

pub struct ScriptController {
    drafting_service: Arc<ScriptDraftingService>,
    skit_service: Arc<SkitService>,
    default_text_model: TextModel,
}

impl ScriptController {
    pub fn new(
        drafting_service: Arc<ScriptDraftingService>,
        skit_service: Arc<SkitService>,
        default_text_model: TextModel,
    ) -> Self {
        Self {
            drafting_service,
            skit_service,
            default_text_model,
        }
    }

    /// POST /api/scripts/generate - Draft a script from a prompt and a cast
    pub async fn generate(
        State(controller): State<Arc<ScriptController>>,
        Json(request): Json<GenerateScriptRequest>,
    ) -> AppResult<Json<GenerateScriptResponse>> {
        let model = resolve_text_model(request.model.as_deref(), controller.default_text_model)?;

        let characters = request
            .characters
            .into_iter()
            .map(|c| RosterEntry {
                name: c.name.trim().to_string(),
                persona: c.persona,
            })
            .collect();

        let script = controller
            .drafting_service
            .draft_script(request.prompt, characters, model)
            .await?;

        Ok(Json(GenerateScriptResponse { script }))
    }

    /// POST /api/scripts/parse - Split a script into cues without rendering it
    pub async fn parse(
        State(controller): State<Arc<ScriptController>>,
        Json(request): Json<ParseScriptRequest>,
    ) -> AppResult<Json<ParseScriptResponse>> {
        let preview = controller
            .skit_service
            .preview(&request.script, profiles_from(request.character_voices))?;

        Ok(Json(ParseScriptResponse {
            cues: preview.cues,
            speakers: preview.speakers,
            unmapped_speakers: preview.unmapped_speakers,
        }))
    }
}

/// Requested text model, or the configured default when none is given
pub fn resolve_text_model(model: Option<&str>, default_model: TextModel) -> AppResult<TextModel> {
    match model.map(str::trim).filter(|m| !m.is_empty()) {
        None => Ok(default_model),
        Some(id) => id.parse().map_err(AppError::BadRequest),
    }
}
