use crate::domain::character::VOICE_CATALOG;
use serde_json::json;

/// A character as seen by the script writer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub name: String,
    pub persona: String,
}

pub fn script_prompt(prompt: &str, characters: &[RosterEntry]) -> String {
    let roster: Vec<String> = characters
        .iter()
        .map(|c| {
            let persona = if c.persona.trim().is_empty() {
                "(no persona given)"
            } else {
                c.persona.trim()
            };
            format!("- Name: {}\n  Persona: {}", c.name, persona)
        })
        .collect();

    format!(
        r#"You write short audio skits made of natural, believable dialogue.

Write a script for the request below. Use exactly these characters, spelled exactly as given, and keep each one true to their persona. Do not add other speakers.

Every line of the script must have the form `Name: Dialogue`, one line per turn, with no headings, narration or blank speaker names.

Stage directions or emotional cues go in parentheses inside the dialogue, e.g. `Anna: (laughing) No way.` Use them sparingly, only where the tone is not clear from the words. They are performance hints and must never be written as lines the characters say out loud.

Request:
"{prompt}"

Characters:
{roster}

Respond with JSON of the form {{"script": "<the full script>"}}."#,
        prompt = prompt.trim(),
        roster = roster.join("\n"),
    )
}

pub fn script_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "script": { "type": "STRING" }
        },
        "required": ["script"]
    })
}

pub fn voice_prompt(persona: &str) -> String {
    let voices: Vec<String> = VOICE_CATALOG
        .iter()
        .map(|v| format!("- {}: {}", v.id, v.label()))
        .collect();

    format!(
        r#"You are casting voices for an audio skit. Pick the single voice from the list that best fits the character described below.

Available voices:
{voices}

Character persona:
"{persona}"

Answer with only the id of one voice from the list, as JSON of the form {{"voiceId": "<id>"}}."#,
        voices = voices.join("\n"),
        persona = persona.trim(),
    )
}

pub fn voice_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "voiceId": { "type": "STRING" }
        },
        "required": ["voiceId"]
    })
}

/// Strip a Markdown code fence some models wrap JSON answers in
pub fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
