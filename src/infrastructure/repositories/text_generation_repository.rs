use crate::domain::drafting::TextModel;
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq)]
pub struct TextGenerationRequest {
    pub model: TextModel,
    pub prompt: String,
    /// JSON schema the reply must follow
    pub response_schema: serde_json::Value,
}

/// Repository for text generation (script drafting, voice casting)
#[async_trait]
pub trait TextGenerationRepository: Send + Sync {
    /// Generate a reply to `request.prompt`
    ///
    /// Returns the raw JSON text produced by the model
    async fn generate(&self, request: &TextGenerationRequest) -> Result<String, String>;
}
