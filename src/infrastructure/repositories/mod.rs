pub mod gemini_speech_repository;
pub mod gemini_text_repository;
pub mod openai_speech_repository;
pub mod openai_text_repository;
pub mod speech_repository;
pub mod text_generation_repository;

pub use gemini_speech_repository::GeminiSpeechRepository;
pub use gemini_text_repository::GeminiTextRepository;
pub use openai_speech_repository::OpenAiSpeechRepository;
pub use openai_text_repository::OpenAiTextRepository;
pub use speech_repository::{DialogueSpeechRequest, LineSpeechRequest, SpeakerVoice, SpeechRepository};
pub use text_generation_repository::{TextGenerationRepository, TextGenerationRequest};
