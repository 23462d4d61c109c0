use crate::domain::audio::EncodedAudio;
use crate::domain::character::{CharacterProfile, CharacterRegistry};
use crate::domain::script::{self, SpeechCue};

pub mod error;
pub mod model;
pub mod service;

pub use error::SkitServiceError;
pub use model::{DispatchStrategy, SpeechModel};
pub use service::{SkitService, SkitServiceApi, SkitSettings, SpeechRepositories};

/// Snapshot of everything one generation run needs
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub script: String,
    pub cues: Vec<SpeechCue>,
    pub registry: CharacterRegistry,
    pub model: SpeechModel,
}

impl GenerationRequest {
    /// Validate caller input and parse the script
    pub fn prepare(
        script: String,
        characters: Vec<CharacterProfile>,
        model: SpeechModel,
        max_script_chars: usize,
    ) -> Result<Self, SkitServiceError> {
        if script.trim().is_empty() {
            return Err(SkitServiceError::Validation(
                "The script is empty. Please provide a script to generate audio.".to_string(),
            ));
        }

        let char_count = script.chars().count();
        if char_count > max_script_chars {
            return Err(SkitServiceError::PayloadTooLarge(format!(
                "Script must be {} characters or less (got {})",
                max_script_chars, char_count
            )));
        }

        if characters.is_empty() {
            return Err(SkitServiceError::Validation(
                "No characters defined. Please add at least one character with a voice."
                    .to_string(),
            ));
        }

        let mut registry = CharacterRegistry::from_profiles(characters)?;
        registry.validate_voices()?;

        let cues = script::parse(&script);
        if cues.is_empty() {
            return Err(SkitServiceError::Validation(
                "The script has no lines in the `Name: Dialogue` format.".to_string(),
            ));
        }

        Ok(Self {
            script,
            cues,
            registry,
            model,
        })
    }

    pub fn strategy(&self) -> DispatchStrategy {
        self.model.strategy()
    }

    /// Key identifying the audio this request renders to
    pub fn cache_key(&self) -> String {
        let profiles: Vec<String> = self
            .registry
            .sorted_profiles()
            .into_iter()
            .map(|p| format!("{}\u{1f}{}\u{1f}{}", p.name, p.voice_id, p.persona_text))
            .collect();
        format!("{}\u{1e}{}\u{1e}{}", self.model, self.script, profiles.join("\u{1d}"))
    }
}

/// Outcome of a successful generation run
#[derive(Debug, Clone)]
pub struct SkitAudio {
    pub audio: EncodedAudio,
    pub model: SpeechModel,
    pub strategy: DispatchStrategy,
    pub cue_count: usize,
    pub rendered_cues: usize,
    /// Speakers whose lines were left out because they have no profile
    pub skipped_speakers: Vec<String>,
}

/// Parsed view of a script against a roster
#[derive(Debug, Clone)]
pub struct ScriptPreview {
    pub cues: Vec<SpeechCue>,
    pub speakers: Vec<String>,
    pub unmapped_speakers: Vec<String>,
}
