use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::Value;
use std::io::Cursor;

/// Decoded WAV: spec plus the raw sample bytes
pub struct DecodedWav {
    pub spec: hound::WavSpec,
    pub pcm: Vec<u8>,
}

pub fn decode_wav(bytes: &[u8]) -> DecodedWav {
    let mut reader = hound::WavReader::new(Cursor::new(bytes)).expect("Not a valid WAV file");
    let spec = reader.spec();
    let pcm = reader
        .samples::<i16>()
        .flat_map(|s| s.expect("Invalid sample").to_le_bytes())
        .collect();
    DecodedWav { spec, pcm }
}

/// Decode a `data:audio/wav;base64,...` URI into its WAV contents
pub fn decode_data_uri(uri: &str) -> DecodedWav {
    let payload = uri
        .strip_prefix("data:audio/wav;base64,")
        .unwrap_or_else(|| panic!("Unexpected data URI prefix: {}", &uri[..uri.len().min(40)]));
    let bytes = STANDARD.decode(payload).expect("Invalid base64 payload");
    decode_wav(&bytes)
}

pub fn assert_mono_24khz_16bit(spec: &hound::WavSpec) {
    assert_eq!(spec.channels, 1, "channel count");
    assert_eq!(spec.sample_rate, 24_000, "sample rate");
    assert_eq!(spec.bits_per_sample, 16, "bits per sample");
}

pub fn assert_skit_response(body: &Value) {
    for field in [
        "audioDataUri",
        "strategy",
        "model",
        "cueCount",
        "renderedCues",
        "skippedSpeakers",
        "durationMs",
    ] {
        assert!(body.get(field).is_some(), "Missing {} field", field);
    }
}

pub fn assert_voice_entry(voice: &Value) {
    assert!(voice.get("id").and_then(|v| v.as_str()).is_some(), "Missing id");
    assert!(
        voice.get("displayName").and_then(|v| v.as_str()).is_some(),
        "Missing displayName"
    );
    assert!(
        voice.get("category").and_then(|v| v.as_str()).is_some(),
        "Missing category"
    );
}
