use super::catalog::{find_voice, is_known_voice};
use super::CharacterProfile;
use crate::domain::script::{speaker_names, SpeechCue};
use std::collections::HashMap;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("character names cannot be empty")]
    EmptyName,
    #[error("character \"{character}\" uses unknown voice \"{voice_id}\"")]
    UnknownVoice { character: String, voice_id: String },
}

/// Immutable name → profile snapshot used for one generation run
#[derive(Debug, Clone, Default)]
pub struct CharacterRegistry {
    profiles: HashMap<String, CharacterProfile>,
}

impl CharacterRegistry {
    /// Build a registry from profiles. Names are trimmed; when two profiles
    /// share a name the later one wins.
    pub fn from_profiles<I>(profiles: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = CharacterProfile>,
    {
        let mut map = HashMap::new();

        for mut profile in profiles {
            profile.name = profile.name.trim().to_string();
            if profile.name.is_empty() {
                return Err(RegistryError::EmptyName);
            }

            if let Some(previous) = map.insert(profile.name.clone(), profile) {
                tracing::warn!(
                    character = %previous.name,
                    "Duplicate character profile, keeping the last one"
                );
            }
        }

        Ok(Self { profiles: map })
    }

    /// Exact, case-sensitive lookup
    pub fn resolve(&self, name: &str) -> Option<&CharacterProfile> {
        self.profiles.get(name)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn all_speaker_names(cues: &[SpeechCue]) -> Vec<String> {
        speaker_names(cues)
    }

    /// Distinct speakers referenced by `cues` that have no profile, in order
    /// of first appearance
    pub fn unmapped_speakers(&self, cues: &[SpeechCue]) -> Vec<String> {
        speaker_names(cues)
            .into_iter()
            .filter(|name| !self.profiles.contains_key(name))
            .collect()
    }

    /// Check every profile's voice against the catalog and normalize it to
    /// the canonical catalog id
    pub fn validate_voices(&mut self) -> Result<(), RegistryError> {
        let mut names: Vec<&String> = self.profiles.keys().collect();
        names.sort();
        for name in names {
            let profile = &self.profiles[name];
            if !is_known_voice(&profile.voice_id) {
                return Err(RegistryError::UnknownVoice {
                    character: profile.name.clone(),
                    voice_id: profile.voice_id.clone(),
                });
            }
        }

        for profile in self.profiles.values_mut() {
            if let Some(voice) = find_voice(&profile.voice_id) {
                profile.voice_id = voice.id.to_string();
            }
        }

        Ok(())
    }

    /// Profiles sorted by name, for stable cache keys and logging
    pub fn sorted_profiles(&self) -> Vec<&CharacterProfile> {
        let mut profiles: Vec<&CharacterProfile> = self.profiles.values().collect();
        profiles.sort_by(|a, b| a.name.cmp(&b.name));
        profiles
    }
}
