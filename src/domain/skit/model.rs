use crate::domain::shared::ModelProvider;
use serde::{Deserialize, Serialize};

/// How a script is turned into audio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DispatchStrategy {
    /// One call renders the whole script with a speaker → voice map
    MultiSpeaker,
    /// One call per cue, run concurrently and stitched back in order
    PerLine,
}

impl DispatchStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchStrategy::MultiSpeaker => "multi-speaker",
            DispatchStrategy::PerLine => "per-line",
        }
    }
}

impl std::fmt::Display for DispatchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Speech synthesis models the service knows how to drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpeechModel {
    #[serde(rename = "gemini-2.5-flash-preview-tts")]
    GeminiFlashTts,
    #[serde(rename = "gemini-2.5-pro-preview-tts")]
    GeminiProTts,
    /// Gemini TTS driven one line at a time, one catalog voice per call
    #[serde(rename = "gemini-2.5-flash-preview-tts-per-line")]
    GeminiFlashTtsPerLine,
    #[serde(rename = "gemini-2.5-pro-preview-tts-per-line")]
    GeminiProTtsPerLine,
    #[serde(rename = "tts-1")]
    OpenAiTts1,
    #[serde(rename = "tts-1-hd")]
    OpenAiTts1Hd,
    #[serde(rename = "gpt-4o-mini-tts")]
    OpenAiGpt4oMiniTts,
}

impl SpeechModel {
    pub const ALL: [SpeechModel; 7] = [
        SpeechModel::GeminiFlashTts,
        SpeechModel::GeminiProTts,
        SpeechModel::GeminiFlashTtsPerLine,
        SpeechModel::GeminiProTtsPerLine,
        SpeechModel::OpenAiTts1,
        SpeechModel::OpenAiTts1Hd,
        SpeechModel::OpenAiGpt4oMiniTts,
    ];

    /// Model id as accepted on the API
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeechModel::GeminiFlashTts => "gemini-2.5-flash-preview-tts",
            SpeechModel::GeminiProTts => "gemini-2.5-pro-preview-tts",
            SpeechModel::GeminiFlashTtsPerLine => "gemini-2.5-flash-preview-tts-per-line",
            SpeechModel::GeminiProTtsPerLine => "gemini-2.5-pro-preview-tts-per-line",
            SpeechModel::OpenAiTts1 => "tts-1",
            SpeechModel::OpenAiTts1Hd => "tts-1-hd",
            SpeechModel::OpenAiGpt4oMiniTts => "gpt-4o-mini-tts",
        }
    }

    /// Model id as sent to the provider
    pub fn provider_model_id(&self) -> &'static str {
        match self {
            SpeechModel::GeminiFlashTtsPerLine => SpeechModel::GeminiFlashTts.as_str(),
            SpeechModel::GeminiProTtsPerLine => SpeechModel::GeminiProTts.as_str(),
            other => other.as_str(),
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim();
        Self::ALL.into_iter().find(|m| m.as_str() == id)
    }

    pub fn provider(&self) -> ModelProvider {
        match self {
            SpeechModel::GeminiFlashTts
            | SpeechModel::GeminiProTts
            | SpeechModel::GeminiFlashTtsPerLine
            | SpeechModel::GeminiProTtsPerLine => ModelProvider::Gemini,
            SpeechModel::OpenAiTts1 | SpeechModel::OpenAiTts1Hd | SpeechModel::OpenAiGpt4oMiniTts => {
                ModelProvider::OpenAi
            }
        }
    }

    /// The plain Gemini ids take a whole dialogue with a speaker map. The
    /// `-per-line` Gemini ids and OpenAI speech render one voice per call.
    pub fn strategy(&self) -> DispatchStrategy {
        match self {
            SpeechModel::GeminiFlashTts | SpeechModel::GeminiProTts => {
                DispatchStrategy::MultiSpeaker
            }
            _ => DispatchStrategy::PerLine,
        }
    }
}

impl std::fmt::Display for SpeechModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SpeechModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| {
            let known: Vec<&str> = Self::ALL.iter().map(|m| m.as_str()).collect();
            format!("unknown speech model \"{}\" (expected one of: {})", s, known.join(", "))
        })
    }
}
