use super::error::DraftingServiceError;
use super::model::TextModel;
use super::prompt::{self, RosterEntry};
use crate::domain::character::{find_voice, VoiceCatalogEntry};
use crate::domain::shared::ModelProvider;
use crate::infrastructure::repositories::{TextGenerationRepository, TextGenerationRequest};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

/// Text generation repositories by provider
#[derive(Clone)]
pub struct TextRepositories {
    pub gemini: Arc<dyn TextGenerationRepository>,
    pub openai: Option<Arc<dyn TextGenerationRepository>>,
}

impl TextRepositories {
    fn for_model(
        &self,
        model: TextModel,
    ) -> Result<Arc<dyn TextGenerationRepository>, DraftingServiceError> {
        match model.provider() {
            ModelProvider::Gemini => Ok(self.gemini.clone()),
            ModelProvider::OpenAi => self.openai.clone().ok_or_else(|| {
                DraftingServiceError::Validation(format!(
                    "Model {} is not available: no OpenAI API key is configured",
                    model
                ))
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ScriptDraft {
    script: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSuggestion {
    voice_id: Option<String>,
}

pub struct ScriptDraftingService {
    text_repos: TextRepositories,
}

impl ScriptDraftingService {
    pub fn new(text_repos: TextRepositories) -> Self {
        Self { text_repos }
    }
}

#[async_trait]
pub trait ScriptDraftingServiceApi: Send + Sync {
    /// Ask a language model for a `Name: Dialogue` script featuring the
    /// given characters. The text is returned as generated.
    async fn draft_script(
        &self,
        prompt: String,
        characters: Vec<RosterEntry>,
        model: TextModel,
    ) -> Result<String, DraftingServiceError>;

    /// Pick the catalog voice that best fits a persona
    async fn suggest_voice(
        &self,
        persona: String,
        model: TextModel,
    ) -> Result<&'static VoiceCatalogEntry, DraftingServiceError>;
}

#[async_trait]
impl ScriptDraftingServiceApi for ScriptDraftingService {
    async fn draft_script(
        &self,
        prompt: String,
        characters: Vec<RosterEntry>,
        model: TextModel,
    ) -> Result<String, DraftingServiceError> {
        if prompt.trim().is_empty() {
            return Err(DraftingServiceError::Validation(
                "The prompt is empty. Describe the skit you want written.".to_string(),
            ));
        }
        if characters.is_empty() || characters.iter().any(|c| c.name.trim().is_empty()) {
            return Err(DraftingServiceError::Validation(
                "Add at least one named character before drafting a script.".to_string(),
            ));
        }

        tracing::info!(
            model = %model,
            prompt_length = prompt.len(),
            character_count = characters.len(),
            "Script drafting request"
        );

        let request = TextGenerationRequest {
            model,
            prompt: prompt::script_prompt(&prompt, &characters),
            response_schema: prompt::script_schema(),
        };

        let reply = self.generate(&request).await?;

        let draft: ScriptDraft = serde_json::from_str(prompt::strip_code_fence(&reply))
            .map_err(|e| {
                tracing::warn!(error = %e, reply_length = reply.len(), "Script draft is not valid JSON");
                DraftingServiceError::Drafting(
                    "The model did not return a script in the expected format. Please try again."
                        .to_string(),
                )
            })?;

        let script = draft
            .script
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| {
                DraftingServiceError::Drafting("The model returned an empty script.".to_string())
            })?;

        tracing::info!(model = %model, script_length = script.len(), "Script drafted");

        Ok(script)
    }

    async fn suggest_voice(
        &self,
        persona: String,
        model: TextModel,
    ) -> Result<&'static VoiceCatalogEntry, DraftingServiceError> {
        if persona.trim().is_empty() {
            return Err(DraftingServiceError::Validation(
                "The persona is empty. Describe the character to get a voice suggestion."
                    .to_string(),
            ));
        }

        let request = TextGenerationRequest {
            model,
            prompt: prompt::voice_prompt(&persona),
            response_schema: prompt::voice_schema(),
        };

        let reply = self.generate(&request).await?;

        let suggestion: VoiceSuggestion = serde_json::from_str(prompt::strip_code_fence(&reply))
            .map_err(|e| {
                tracing::warn!(error = %e, "Voice suggestion is not valid JSON");
                DraftingServiceError::Drafting(
                    "The model did not return a voice suggestion in the expected format."
                        .to_string(),
                )
            })?;

        let voice_id = suggestion.voice_id.unwrap_or_default();
        let voice = find_voice(&voice_id).ok_or_else(|| {
            tracing::warn!(voice_id = %voice_id, "Suggested voice is not in the catalog");
            DraftingServiceError::Catalog(format!(
                "The model suggested \"{}\", which is not an available voice.",
                voice_id.trim()
            ))
        })?;

        tracing::info!(model = %model, voice_id = voice.id, "Voice suggested");

        Ok(voice)
    }
}

impl ScriptDraftingService {
    async fn generate(&self, request: &TextGenerationRequest) -> Result<String, DraftingServiceError> {
        let repo = self.text_repos.for_model(request.model)?;
        repo.generate(request).await.map_err(|e| {
            tracing::error!(error = %e, model = %request.model, "Text generation failed");
            DraftingServiceError::Backend(format!("The text generation service failed: {}", e))
        })
    }
}
