use serde::{Deserialize, Serialize};

pub mod parser;

pub use parser::parse;

/// One line of dialogue extracted from a script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechCue {
    /// 0-based line position in the original script, defines audio order
    pub sequence_index: usize,
    pub speaker_name: String,
    pub dialogue_text: String,
}

/// Distinct speaker names in order of first appearance
pub fn speaker_names(cues: &[SpeechCue]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for cue in cues {
        if !names.iter().any(|n| n == &cue.speaker_name) {
            names.push(cue.speaker_name.clone());
        }
    }
    names
}
