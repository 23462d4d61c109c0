use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::infrastructure::config::Config;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Reports which speech and text providers this instance can reach
pub async fn health_ready(State(config): State<Arc<Config>>) -> impl IntoResponse {
    let openai = if config.openai_api_key.is_some() {
        "configured"
    } else {
        "not_configured"
    };

    (
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "providers": {
                "gemini": "configured",
                "openai": openai
            },
            "defaultSpeechModel": config.default_speech_model.as_str(),
            "defaultTextModel": config.default_text_model.as_str()
        })),
    )
}
