use crate::domain::shared::ModelProvider;
use serde::{Deserialize, Serialize};

/// Text generation models used for drafting scripts and casting voices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextModel {
    #[serde(rename = "gemini-2.0-flash")]
    Gemini20Flash,
    #[serde(rename = "gemini-2.5-flash")]
    Gemini25Flash,
    #[serde(rename = "gemini-2.5-pro")]
    Gemini25Pro,
    #[serde(rename = "gpt-4o-mini")]
    Gpt4oMini,
    #[serde(rename = "gpt-4o")]
    Gpt4o,
}

impl TextModel {
    pub const ALL: [TextModel; 5] = [
        TextModel::Gemini20Flash,
        TextModel::Gemini25Flash,
        TextModel::Gemini25Pro,
        TextModel::Gpt4oMini,
        TextModel::Gpt4o,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TextModel::Gemini20Flash => "gemini-2.0-flash",
            TextModel::Gemini25Flash => "gemini-2.5-flash",
            TextModel::Gemini25Pro => "gemini-2.5-pro",
            TextModel::Gpt4oMini => "gpt-4o-mini",
            TextModel::Gpt4o => "gpt-4o",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim();
        Self::ALL.into_iter().find(|m| m.as_str() == id)
    }

    pub fn provider(&self) -> ModelProvider {
        match self {
            TextModel::Gemini20Flash | TextModel::Gemini25Flash | TextModel::Gemini25Pro => {
                ModelProvider::Gemini
            }
            TextModel::Gpt4oMini | TextModel::Gpt4o => ModelProvider::OpenAi,
        }
    }
}

impl std::fmt::Display for TextModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TextModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| {
            let known: Vec<&str> = Self::ALL.iter().map(|m| m.as_str()).collect();
            format!("unknown text model \"{}\" (expected one of: {})", s, known.join(", "))
        })
    }
}
