use crate::domain::audio::AudioFormat;
use crate::domain::drafting::TextModel;
use crate::domain::skit::{SkitSettings, SpeechModel};
use crate::infrastructure::gemini::GEMINI_DEFAULT_BASE_URL;
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Providers
    pub gemini_api_key: String,
    pub gemini_base_url: String,
    pub openai_api_key: Option<String>,
    pub default_speech_model: SpeechModel,
    pub default_text_model: TextModel,
    // Audio output
    pub audio_sample_rate: u32,
    pub audio_channels: u16,
    pub audio_bits_per_sample: u16,
    // Generation
    pub max_concurrent_lines: usize,
    pub max_script_chars: usize,
    pub persona_hints_enabled: bool,
    pub skit_cache_enabled: bool,
    pub cors_allow_any_origin: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

fn env_flag(key: &str, default: bool) -> bool {
    env::var(key)
        .map(|s| match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" => true,
            "false" | "0" | "no" => false,
            _ => default,
        })
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let environment = match env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "development".to_string())
            .as_str()
        {
            "production" => Environment::Production,
            _ => Environment::Development,
        };

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            log_format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            gemini_api_key: env::var("GEMINI_API_KEY")
                .map_err(|_| "GEMINI_API_KEY must be set")?,
            gemini_base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| GEMINI_DEFAULT_BASE_URL.to_string()),
            openai_api_key: env::var("OPENAI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            default_speech_model: env::var("DEFAULT_SPEECH_MODEL")
                .unwrap_or_else(|_| SpeechModel::GeminiFlashTts.as_str().to_string())
                .parse()?,
            default_text_model: env::var("DEFAULT_TEXT_MODEL")
                .unwrap_or_else(|_| TextModel::Gemini20Flash.as_str().to_string())
                .parse()?,
            audio_sample_rate: env::var("AUDIO_SAMPLE_RATE")
                .unwrap_or_else(|_| "24000".to_string())
                .parse()?,
            audio_channels: env::var("AUDIO_CHANNELS")
                .unwrap_or_else(|_| "1".to_string())
                .parse()?,
            audio_bits_per_sample: env::var("AUDIO_BITS_PER_SAMPLE")
                .unwrap_or_else(|_| "16".to_string())
                .parse()?,
            max_concurrent_lines: env::var("MAX_CONCURRENT_LINES")
                .unwrap_or_else(|_| "8".to_string())
                .parse()?,
            max_script_chars: env::var("MAX_SCRIPT_CHARS")
                .unwrap_or_else(|_| "20000".to_string())
                .parse()?,
            persona_hints_enabled: env_flag("PERSONA_HINTS_ENABLED", true),
            skit_cache_enabled: env_flag("SKIT_CACHE_ENABLED", false),
            cors_allow_any_origin: env_flag(
                "CORS_ALLOW_ANY_ORIGIN",
                environment == Environment::Development,
            ),
            environment,
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn audio_format(&self) -> AudioFormat {
        AudioFormat {
            channels: self.audio_channels,
            sample_rate: self.audio_sample_rate,
            bits_per_sample: self.audio_bits_per_sample,
        }
    }

    pub fn skit_settings(&self) -> SkitSettings {
        SkitSettings {
            max_concurrent_lines: self.max_concurrent_lines,
            max_script_chars: self.max_script_chars,
            persona_hints: self.persona_hints_enabled,
            cache_enabled: self.skit_cache_enabled,
        }
    }
}
