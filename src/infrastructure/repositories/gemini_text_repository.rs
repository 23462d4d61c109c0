use super::text_generation_repository::{TextGenerationRepository, TextGenerationRequest};
use crate::infrastructure::gemini::{GeminiClient, GenerateContentRequest, GenerationConfig};
use async_trait::async_trait;
use std::sync::Arc;

/// Gemini text generation in JSON mode
pub struct GeminiTextRepository {
    client: Arc<GeminiClient>,
}

impl GeminiTextRepository {
    pub fn new(client: Arc<GeminiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TextGenerationRepository for GeminiTextRepository {
    async fn generate(&self, request: &TextGenerationRequest) -> Result<String, String> {
        let start_time = std::time::Instant::now();
        let model = request.model.as_str();

        let body = GenerateContentRequest::from_prompt(
            request.prompt.as_str(),
            GenerationConfig::json(request.response_schema.clone()),
        );

        let response = self
            .client
            .generate_content(model, &body)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, model = model, "Gemini text generation failed");
                e.to_string()
            })?;

        let text = response.text().ok_or_else(|| match response.stop_reason() {
            Some(reason) => format!("no text in response (reason: {})", reason),
            None => "no text in response".to_string(),
        })?;

        tracing::info!(
            provider = "gemini",
            model = model,
            latency_ms = start_time.elapsed().as_millis(),
            prompt_length = request.prompt.len(),
            reply_length = text.len(),
            "Text generation completed"
        );

        Ok(text)
    }
}
