use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::script::resolve_text_model;
use crate::{
    domain::{
        character::{voices_in, VoiceCatalogEntry, VoiceCategory},
        drafting::{ScriptDraftingService, ScriptDraftingServiceApi, TextModel},
    },
    error::AppResult,
};

/// Request for POST /api/voices/suggest
#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestVoiceRequest {
    pub persona: String,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestVoiceResponse {
    pub voice_id: String,
}

#[derive(Debug, Serialize)]
pub struct VoiceGroup {
    pub category: VoiceCategory,
    pub voices: Vec<&'static VoiceCatalogEntry>,
}

#[derive(Debug, Serialize)]
pub struct VoiceListResponse {
    pub categories: Vec<VoiceGroup>,
}

pub struct VoiceController {
    drafting_service: Arc<ScriptDraftingService>,
    default_text_model: TextModel,
}

impl VoiceController {
    pub fn new(drafting_service: Arc<ScriptDraftingService>, default_text_model: TextModel) -> Self {
        Self {
            drafting_service,
            default_text_model,
        }
    }

    /// GET /api/voices - The voice catalog grouped by category
    pub async fn list() -> Json<VoiceListResponse> {
        let categories = [VoiceCategory::Male, VoiceCategory::Female, VoiceCategory::Neutral]
            .into_iter()
            .map(|category| VoiceGroup {
                category,
                voices: voices_in(category).collect(),
            })
            .collect();

        Json(VoiceListResponse { categories })
    }

    /// POST /api/voices/suggest - Let a language model cast a voice for a persona
    pub async fn suggest(
        State(controller): State<Arc<VoiceController>>,
        Json(request): Json<SuggestVoiceRequest>,
    ) -> AppResult<Json<SuggestVoiceResponse>> {
        let model = resolve_text_model(request.model.as_deref(), controller.default_text_model)?;

        let voice = controller
            .drafting_service
            .suggest_voice(request.persona, model)
            .await?;

        Ok(Json(SuggestVoiceResponse {
            voice_id: voice.id.to_string(),
        }))
    }
}
