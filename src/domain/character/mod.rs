use serde::{Deserialize, Serialize};

pub mod catalog;
pub mod registry;

pub use catalog::{
    find_voice, is_known_voice, voices_in, VoiceCatalogEntry, VoiceCategory, VOICE_CATALOG,
};
pub use registry::{CharacterRegistry, RegistryError};

/// Voice and persona configuration for one named participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterProfile {
    pub name: String,
    pub voice_id: String,
    #[serde(default)]
    pub persona_text: String,
}

impl CharacterProfile {
    pub fn new(
        name: impl Into<String>,
        voice_id: impl Into<String>,
        persona_text: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            voice_id: voice_id.into(),
            persona_text: persona_text.into(),
        }
    }

    /// Persona text, or `None` when blank
    pub fn persona(&self) -> Option<&str> {
        let persona = self.persona_text.trim();
        if persona.is_empty() {
            None
        } else {
            Some(persona)
        }
    }
}
