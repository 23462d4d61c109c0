use async_openai::{config::OpenAIConfig, Client};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use voiceskit_backend::controllers::{
    script::ScriptController, skit::SkitController, voice::VoiceController,
};
use voiceskit_backend::domain::audio::AudioAssembler;
use voiceskit_backend::domain::drafting::{ScriptDraftingService, TextRepositories};
use voiceskit_backend::domain::skit::{SkitService, SpeechRepositories};
use voiceskit_backend::infrastructure::config::{Config, LogFormat};
use voiceskit_backend::infrastructure::gemini::GeminiClient;
use voiceskit_backend::infrastructure::http::{build_router, start_http_server};
use voiceskit_backend::infrastructure::repositories::{
    GeminiSpeechRepository, GeminiTextRepository, OpenAiSpeechRepository, OpenAiTextRepository,
    SpeechRepository, TextGenerationRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting VoiceSkit Backend on {}:{}",
        config.host,
        config.port
    );
    if config.is_development() && config.cors_allow_any_origin {
        tracing::warn!("Development mode: CORS allows any origin");
    }

    let audio_format = config.audio_format();
    tracing::info!(
        channels = audio_format.channels,
        sample_rate = audio_format.sample_rate,
        bits_per_sample = audio_format.bits_per_sample,
        "Audio output format"
    );
    let assembler = AudioAssembler::new(audio_format)?;

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate provider clients
    tracing::info!("Instantiating provider clients...");
    let gemini_client = Arc::new(GeminiClient::new(
        config.gemini_api_key.clone(),
        config.gemini_base_url.clone(),
    ));
    let openai_client = config.openai_api_key.as_ref().map(|key| {
        Arc::new(Client::with_config(
            OpenAIConfig::new().with_api_key(key.clone()),
        ))
    });
    if openai_client.is_none() {
        tracing::warn!("OPENAI_API_KEY not set. OpenAI models will be rejected.");
    }

    // 2. Instantiate repositories (inject clients)
    tracing::info!("Instantiating repositories...");
    let speech_repos = SpeechRepositories {
        gemini: Arc::new(GeminiSpeechRepository::new(gemini_client.clone())),
        openai: openai_client.clone().map(|client| {
            Arc::new(OpenAiSpeechRepository::new(client)) as Arc<dyn SpeechRepository>
        }),
    };
    let text_repos = TextRepositories {
        gemini: Arc::new(GeminiTextRepository::new(gemini_client)),
        openai: openai_client.map(|client| {
            Arc::new(OpenAiTextRepository::new(client)) as Arc<dyn TextGenerationRepository>
        }),
    };

    // 3. Instantiate services (inject repositories)
    tracing::info!("Instantiating services...");
    let skit_service = Arc::new(SkitService::new(
        speech_repos,
        assembler,
        config.skit_settings(),
    ));
    let drafting_service = Arc::new(ScriptDraftingService::new(text_repos));

    // 4. Instantiate controllers (inject services)
    tracing::info!("Instantiating controllers...");
    let skit_controller = Arc::new(SkitController::new(
        skit_service.clone(),
        config.default_speech_model,
    ));
    let script_controller = Arc::new(ScriptController::new(
        drafting_service.clone(),
        skit_service,
        config.default_text_model,
    ));
    let voice_controller = Arc::new(VoiceController::new(
        drafting_service,
        config.default_text_model,
    ));

    // Start HTTP server with all routes
    let app = build_router(
        config.clone(),
        skit_controller,
        script_controller,
        voice_controller,
    );
    start_http_server(config, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "voiceskit_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "voiceskit_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
