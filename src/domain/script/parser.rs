use super::SpeechCue;
use regex::Regex;
use std::sync::LazyLock;

/// Speaker tokens: letters, digits, spaces and a little name punctuation.
/// Anything else (e.g. the "12" in "12:30 we leave") is not a speaker.
static SPEAKER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}\p{N}_ .'\-]+$").unwrap());

/// Parse a `Name: Dialogue` script into an ordered list of cues.
///
/// Each non-blank line is split at its first colon. Lines without a colon,
/// with an empty speaker or dialogue, or with a speaker token that is not
/// name-like are skipped. The cue's `sequence_index` is the 0-based line
/// number, so indices are strictly increasing but may have gaps.
///
/// Parenthetical stage directions are left in the dialogue untouched.
pub fn parse(script: &str) -> Vec<SpeechCue> {
    let mut cues = Vec::new();

    for (line_index, line) in script.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_line(line) {
            Some((speaker, dialogue)) => cues.push(SpeechCue {
                sequence_index: line_index,
                speaker_name: speaker.to_string(),
                dialogue_text: dialogue.to_string(),
            }),
            None => {
                tracing::debug!(line_index = line_index, line = %line, "Skipping unparseable script line");
            }
        }
    }

    cues
}

fn parse_line(line: &str) -> Option<(&str, &str)> {
    let (speaker, dialogue) = line.split_once(':')?;
    let speaker = speaker.trim();
    let dialogue = dialogue.trim();

    if speaker.is_empty() || dialogue.is_empty() {
        return None;
    }
    if !is_speaker_token(speaker) {
        return None;
    }

    Some((speaker, dialogue))
}

fn is_speaker_token(speaker: &str) -> bool {
    SPEAKER_PATTERN.is_match(speaker) && speaker.chars().any(char::is_alphabetic)
}
