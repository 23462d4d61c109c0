use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoiceCategory {
    Male,
    Female,
    Neutral,
}

impl VoiceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoiceCategory::Male => "Male",
            VoiceCategory::Female => "Female",
            VoiceCategory::Neutral => "Neutral",
        }
    }
}

impl std::fmt::Display for VoiceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A prebuilt synthetic voice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceCatalogEntry {
    pub id: &'static str,
    pub display_name: &'static str,
    pub category: VoiceCategory,
}

impl VoiceCatalogEntry {
    const fn new(id: &'static str, display_name: &'static str, category: VoiceCategory) -> Self {
        Self {
            id,
            display_name,
            category,
        }
    }

    /// Label used when listing voices to a language model
    pub fn label(&self) -> String {
        format!("{}, {}", self.display_name, self.category)
    }
}

use VoiceCategory::{Female, Male, Neutral};

/// Every voice a character can be assigned.
pub static VOICE_CATALOG: &[VoiceCatalogEntry] = &[
    VoiceCatalogEntry::new("zubenelgenubi", "Zubenelgenubi - Casual", Male),
    VoiceCatalogEntry::new("iapetus", "Iapetus - Clear", Male),
    VoiceCatalogEntry::new("orus", "Orus - Firm", Male),
    VoiceCatalogEntry::new("puck", "Puck - Upbeat", Male),
    VoiceCatalogEntry::new("achernar", "Achernar - Soft", Male),
    VoiceCatalogEntry::new("alnilam", "Alnilam - Firm", Male),
    VoiceCatalogEntry::new("fenrir", "Fenrir - Excitable", Male),
    VoiceCatalogEntry::new("charon", "Charon - Informative", Male),
    VoiceCatalogEntry::new("enceladus", "Enceladus - Breathy", Male),
    VoiceCatalogEntry::new("umbriel", "Umbriel - Easy-going", Male),
    VoiceCatalogEntry::new("algenib", "Algenib - Gravelly", Male),
    VoiceCatalogEntry::new("rasalgethi", "Rasalgethi - Informative", Male),
    VoiceCatalogEntry::new("schedar", "Schedar - Even", Male),
    VoiceCatalogEntry::new("sadaltager", "Sadaltager - Knowledgeable", Male),
    VoiceCatalogEntry::new("zephyr", "Zephyr - Bright", Female),
    VoiceCatalogEntry::new("kore", "Kore - Firm", Female),
    VoiceCatalogEntry::new("leda", "Leda - Youthful", Female),
    VoiceCatalogEntry::new("aoede", "Aoede - Breezy", Female),
    VoiceCatalogEntry::new("callirrhoe", "Callirrhoe - Easy-going", Female),
    VoiceCatalogEntry::new("achird", "Achird - Friendly", Female),
    VoiceCatalogEntry::new("despina", "Despina - Smooth", Female),
    VoiceCatalogEntry::new("sulafat", "Sulafat - Warm", Female),
    VoiceCatalogEntry::new("gacrux", "Gacrux - Mature", Female),
    VoiceCatalogEntry::new("autonoe", "Autonoe - Bright", Female),
    VoiceCatalogEntry::new("vindemiatrix", "Vindemiatrix - Gentle", Female),
    VoiceCatalogEntry::new("laomedeia", "Laomedeia - Upbeat", Female),
    VoiceCatalogEntry::new("erinome", "Erinome - Clear", Female),
    VoiceCatalogEntry::new("pulcherrima", "Pulcherrima - Forward", Neutral),
];

/// Look up a voice by id, ignoring case and surrounding whitespace
pub fn find_voice(voice_id: &str) -> Option<&'static VoiceCatalogEntry> {
    let voice_id = voice_id.trim();
    VOICE_CATALOG
        .iter()
        .find(|v| v.id.eq_ignore_ascii_case(voice_id))
}

pub fn is_known_voice(voice_id: &str) -> bool {
    find_voice(voice_id).is_some()
}

/// Voices of one category, in catalog order
pub fn voices_in(category: VoiceCategory) -> impl Iterator<Item = &'static VoiceCatalogEntry> {
    VOICE_CATALOG.iter().filter(move |v| v.category == category)
}
