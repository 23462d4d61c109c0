use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;
use voiceskit_backend::{
    controllers::{script::ScriptController, skit::SkitController, voice::VoiceController},
    domain::{
        audio::AudioAssembler,
        drafting::{ScriptDraftingService, TextModel, TextRepositories},
        skit::{SkitService, SpeechModel, SpeechRepositories},
    },
    infrastructure::{
        config::{Config, Environment, LogFormat},
        http::build_router,
        repositories::{SpeechRepository, TextGenerationRepository},
    },
};

pub mod api_client;
pub mod assertions;

use api_client::TestClient;
use mocks::{MockSpeechRepository, MockTextRepository};

pub struct TestContext {
    pub client: TestClient,
    #[allow(dead_code)]
    pub config: Config,
    #[allow(dead_code)]
    pub speech: Arc<MockSpeechRepository>,
    #[allow(dead_code)]
    pub text: Arc<MockTextRepository>,
}

pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0, // Will be assigned by the OS
        environment: Environment::Development,
        log_format: LogFormat::Pretty,
        gemini_api_key: "test-gemini-key".to_string(),
        gemini_base_url: "http://127.0.0.1:9".to_string(),
        openai_api_key: Some("test-openai-key".to_string()),
        default_speech_model: SpeechModel::GeminiFlashTts,
        default_text_model: TextModel::Gemini20Flash,
        audio_sample_rate: 24_000,
        audio_channels: 1,
        audio_bits_per_sample: 16,
        max_concurrent_lines: 4,
        max_script_chars: 2_000,
        persona_hints_enabled: true,
        skit_cache_enabled: false, // Disable cache in tests to avoid test pollution
        cors_allow_any_origin: true,
    }
}

impl TestContext {
    pub async fn new() -> Result<Self> {
        Self::with_mocks(MockSpeechRepository::default(), MockTextRepository::default()).await
    }

    /// Boot the app on a random port with the given backends standing in for
    /// both providers
    pub async fn with_mocks(speech: MockSpeechRepository, text: MockTextRepository) -> Result<Self> {
        Self::with_config(test_config(), speech, text).await
    }

    pub async fn with_config(
        config: Config,
        speech: MockSpeechRepository,
        text: MockTextRepository,
    ) -> Result<Self> {
        let speech = Arc::new(speech);
        let text = Arc::new(text);

        let app = create_app_with_mocks(config.clone(), speech.clone(), text.clone())?;

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let base_url = format!("http://{}", listener.local_addr()?);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self {
            client: TestClient::new(&base_url),
            config,
            speech,
            text,
        })
    }
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            TestContext::new()
                .await
                .expect("Failed to start test app")
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {}
    }
}

fn create_app_with_mocks(
    config: Config,
    speech: Arc<MockSpeechRepository>,
    text: Arc<MockTextRepository>,
) -> Result<Router> {
    let config = Arc::new(config);

    let speech_repos = SpeechRepositories {
        gemini: speech.clone(),
        openai: config.openai_api_key.as_ref().map(|_| speech.clone() as Arc<dyn SpeechRepository>),
    };
    let text_repos = TextRepositories {
        gemini: text.clone(),
        openai: config.openai_api_key.as_ref().map(|_| text.clone() as Arc<dyn TextGenerationRepository>),
    };

    let assembler = AudioAssembler::new(config.audio_format())?;

    let skit_service = Arc::new(SkitService::new(
        speech_repos,
        assembler,
        config.skit_settings(),
    ));
    let drafting_service = Arc::new(ScriptDraftingService::new(text_repos));

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

    Ok(build_router(
        config,
        skit_controller,
        script_controller,
        voice_controller,
    ))
}
