use super::text_generation_repository::{TextGenerationRepository, TextGenerationRequest};
use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs, ResponseFormat,
    },
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

/// OpenAI chat completions in JSON mode
pub struct OpenAiTextRepository {
    client: Arc<Client<OpenAIConfig>>,
}

impl OpenAiTextRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>) -> Self {
        Self { client }
    }
}

fn build_request(request: &TextGenerationRequest) -> Result<CreateChatCompletionRequest, OpenAIError> {
    let system = format!(
        "Reply with a single JSON object matching this schema: {}",
        request.response_schema
    );

    CreateChatCompletionRequestArgs::default()
        .model(request.model.as_str())
        .messages([
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system)
                .build()?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(request.prompt.as_str())
                .build()?
                .into(),
        ])
        .response_format(ResponseFormat::JsonObject)
        .build()
}

#[async_trait]
impl TextGenerationRepository for OpenAiTextRepository {
    async fn generate(&self, request: &TextGenerationRequest) -> Result<String, String> {
        let start_time = std::time::Instant::now();

        let chat_request = build_request(request)
            .map_err(|e| format!("Failed to build OpenAI chat request: {}", e))?;

        let response = self.client.chat().create(chat_request).await.map_err(|e| {
            tracing::error!(error = %e, model = %request.model, "OpenAI chat completion failed");
            format!("OpenAI chat error: {}", e)
        })?;

        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| "no text in response".to_string())?;

        tracing::info!(
            provider = "openai",
            model = %request.model,
            latency_ms = start_time.elapsed().as_millis(),
            prompt_length = request.prompt.len(),
            reply_length = text.len(),
            "Text generation completed"
        );

        Ok(text)
    }
}
