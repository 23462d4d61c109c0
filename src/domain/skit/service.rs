use super::error::SkitServiceError;
use super::model::{DispatchStrategy, SpeechModel};
use super::{GenerationRequest, ScriptPreview, SkitAudio};
use crate::domain::audio::{AudioAssembler, AudioError, AudioSegment, EncodedAudio};
use crate::domain::character::{CharacterProfile, CharacterRegistry};
use crate::domain::script::{self, speaker_names};
use crate::domain::shared::ModelProvider;
use crate::infrastructure::repositories::{
    DialogueSpeechRequest, LineSpeechRequest, SpeakerVoice, SpeechRepository,
};
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Speech repositories by provider. OpenAI is optional and only wired when
/// an API key is configured.
#[derive(Clone)]
pub struct SpeechRepositories {
    pub gemini: Arc<dyn SpeechRepository>,
    pub openai: Option<Arc<dyn SpeechRepository>>,
}

impl SpeechRepositories {
    fn for_model(&self, model: SpeechModel) -> Result<Arc<dyn SpeechRepository>, SkitServiceError> {
        match model.provider() {
            ModelProvider::Gemini => Ok(self.gemini.clone()),
            ModelProvider::OpenAi => self.openai.clone().ok_or_else(|| {
                SkitServiceError::Validation(format!(
                    "Model {} is not available: no OpenAI API key is configured",
                    model
                ))
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SkitSettings {
    pub max_concurrent_lines: usize,
    pub max_script_chars: usize,
    /// Prefix per-line prompts with the character's persona
    pub persona_hints: bool,
    pub cache_enabled: bool,
}

impl Default for SkitSettings {
    fn default() -> Self {
        Self {
            max_concurrent_lines: 8,
            max_script_chars: 20_000,
            persona_hints: true,
            cache_enabled: false,
        }
    }
}

pub struct SkitService {
    speech_repos: SpeechRepositories,
    assembler: AudioAssembler,
    settings: SkitSettings,
    cache: Option<Cache<String, SkitAudio>>,
}

impl SkitService {
    pub fn new(
        speech_repos: SpeechRepositories,
        assembler: AudioAssembler,
        settings: SkitSettings,
    ) -> Self {
        let cache = if settings.cache_enabled {
            Some(
                Cache::builder()
                    .max_capacity(100)
                    .time_to_idle(Duration::from_secs(30 * 60)) // 30 minutes, refreshes on access
                    .build(),
            )
        } else {
            None
        };

        Self {
            speech_repos,
            assembler,
            settings,
            cache,
        }
    }
}

#[async_trait]
pub trait SkitServiceApi: Send + Sync {
    /// Render a script to a single WAV file
    ///
    /// This operation:
    /// - Validates the script, roster and voices
    /// - Parses the script into cues
    /// - Dispatches to the model's strategy (multi-speaker or per-line)
    /// - Assembles the audio in script order
    async fn generate_skit(
        &self,
        script: String,
        characters: Vec<CharacterProfile>,
        model: SpeechModel,
    ) -> Result<SkitAudio, SkitServiceError>;

    /// Parse a script and report which speakers lack a profile
    fn preview(
        &self,
        script: &str,
        characters: Vec<CharacterProfile>,
    ) -> Result<ScriptPreview, SkitServiceError>;
}

#[async_trait]
impl SkitServiceApi for SkitService {
    async fn generate_skit(
        &self,
        script: String,
        characters: Vec<CharacterProfile>,
        model: SpeechModel,
    ) -> Result<SkitAudio, SkitServiceError> {
        tracing::info!(
            model = %model,
            strategy = %model.strategy(),
            script_length = script.len(),
            character_count = characters.len(),
            "Skit generation request"
        );

        let request = GenerationRequest::prepare(
            script,
            characters,
            model,
            self.settings.max_script_chars,
        )?;

        let cache_key = request.cache_key();
        if let Some(cache) = &self.cache {
            if let Some(cached) = cache.get(&cache_key).await {
                tracing::info!(
                    model = %model,
                    cached_audio_size = cached.audio.wav_bytes.len(),
                    "Skit cache hit - returning cached audio"
                );
                return Ok(cached);
            }
        }

        let result = self.dispatch(&request).await?;

        if let Some(cache) = &self.cache {
            cache.insert(cache_key, result.clone()).await;
        }

        Ok(result)
    }

    fn preview(
        &self,
        script: &str,
        characters: Vec<CharacterProfile>,
    ) -> Result<ScriptPreview, SkitServiceError> {
        let registry = CharacterRegistry::from_profiles(characters)?;
        let cues = script::parse(script);

        Ok(ScriptPreview {
            speakers: speaker_names(&cues),
            unmapped_speakers: registry.unmapped_speakers(&cues),
            cues,
        })
    }
}

impl SkitService {
    /// Run one generation request with the strategy its model implies
    pub async fn dispatch(&self, request: &GenerationRequest) -> Result<SkitAudio, SkitServiceError> {
        let start_time = std::time::Instant::now();
        let repo = self.speech_repos.for_model(request.model)?;

        let (audio, rendered_cues, skipped_speakers) = match request.strategy() {
            DispatchStrategy::MultiSpeaker => {
                let audio = self.dispatch_multi_speaker(request, repo).await?;
                (audio, request.cues.len(), Vec::new())
            }
            DispatchStrategy::PerLine => self.dispatch_per_line(request, repo).await?,
        };

        tracing::info!(
            model = %request.model,
            strategy = %request.strategy(),
            latency_ms = start_time.elapsed().as_millis(),
            cue_count = request.cues.len(),
            rendered_cues = rendered_cues,
            skipped_speakers = ?skipped_speakers,
            audio_size_bytes = audio.wav_bytes.len(),
            duration_ms = audio.duration_ms,
            "Skit generation completed"
        );

        Ok(SkitAudio {
            audio,
            model: request.model,
            strategy: request.strategy(),
            cue_count: request.cues.len(),
            rendered_cues,
            skipped_speakers,
        })
    }

    /// One call for the whole script. Every speaker needs a voice up front.
    async fn dispatch_multi_speaker(
        &self,
        request: &GenerationRequest,
        repo: Arc<dyn SpeechRepository>,
    ) -> Result<EncodedAudio, SkitServiceError> {
        let unmapped = request.registry.unmapped_speakers(&request.cues);
        if !unmapped.is_empty() {
            return Err(SkitServiceError::Validation(format!(
                "These speakers in the script have no voice assigned: {}. Add them as characters or fix their names in the script.",
                unmapped.join(", ")
            )));
        }

        let speakers: Vec<SpeakerVoice> = speaker_names(&request.cues)
            .into_iter()
            .filter_map(|name| {
                request.registry.resolve(&name).map(|profile| SpeakerVoice {
                    speaker: name.clone(),
                    voice_id: profile.voice_id.clone(),
                })
            })
            .collect();

        let dialogue = DialogueSpeechRequest {
            model: request.model,
            script: request.script.clone(),
            speakers,
        };

        tracing::info!(
            model = %request.model,
            speaker_count = dialogue.speakers.len(),
            cue_count = request.cues.len(),
            "Dispatching multi-speaker synthesis"
        );

        let raw = repo.synthesize_dialogue(&dialogue).await.map_err(|e| {
            tracing::error!(error = %e, model = %request.model, "Multi-speaker synthesis failed");
            SkitServiceError::Backend(format!(
                "Failed to generate skit. The service reported: {}. Please check that all characters in the script have a voice and the script uses the `Name: Dialogue` format.",
                e
            ))
        })?;

        if raw.is_empty() {
            return Err(SkitServiceError::Backend(
                "The model did not return any audio data. Please check your script and character configuration.".to_string(),
            ));
        }

        Ok(self.assembler.wrap(&raw)?)
    }

    /// One concurrent call per cue, joined once every call has settled.
    /// Failed lines are dropped; the run only fails when none succeed.
    async fn dispatch_per_line(
        &self,
        request: &GenerationRequest,
        repo: Arc<dyn SpeechRepository>,
    ) -> Result<(EncodedAudio, usize, Vec<String>), SkitServiceError> {
        let skipped_speakers = request.registry.unmapped_speakers(&request.cues);
        if !skipped_speakers.is_empty() {
            tracing::warn!(
                speakers = ?skipped_speakers,
                "Skipping lines for speakers without a voice"
            );
        }

        let semaphore = Arc::new(Semaphore::new(self.settings.max_concurrent_lines.max(1)));
        let mut join_set = JoinSet::new();
        let mut eligible = 0usize;

        for cue in &request.cues {
            let Some(profile) = request.registry.resolve(&cue.speaker_name) else {
                continue;
            };

            let line = LineSpeechRequest {
                model: request.model,
                voice_id: profile.voice_id.clone(),
                speaker: profile.name.clone(),
                text: cue.dialogue_text.clone(),
                persona: profile
                    .persona()
                    .filter(|_| self.settings.persona_hints)
                    .map(str::to_string),
            };
            let sequence_index = cue.sequence_index;
            let repo = repo.clone();
            let semaphore = semaphore.clone();

            join_set.spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok();
                let result = repo.synthesize_line(&line).await;
                (sequence_index, line.voice_id, result)
            });
            eligible += 1;
        }

        tracing::info!(
            model = %request.model,
            line_count = eligible,
            max_concurrent = self.settings.max_concurrent_lines,
            "Dispatching per-line synthesis"
        );

        let mut segments = Vec::with_capacity(eligible);
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((sequence_index, _, Ok(samples))) if !samples.is_empty() => {
                    tracing::debug!(
                        sequence_index = sequence_index,
                        audio_size = samples.len(),
                        "Line synthesized"
                    );
                    segments.push(AudioSegment::rendered(sequence_index, samples));
                }
                Ok((sequence_index, voice_id, Ok(_))) => {
                    tracing::warn!(
                        sequence_index = sequence_index,
                        voice = %voice_id,
                        "Line synthesis returned no audio"
                    );
                    segments.push(AudioSegment::missing(sequence_index));
                }
                Ok((sequence_index, voice_id, Err(e))) => {
                    tracing::warn!(
                        sequence_index = sequence_index,
                        voice = %voice_id,
                        error = %e,
                        "Line synthesis failed"
                    );
                    segments.push(AudioSegment::missing(sequence_index));
                }
                Err(e) => {
                    tracing::error!(error = %e, "Line synthesis task aborted");
                }
            }
        }

        segments.sort_by_key(|s| s.sequence_index);
        let returned = segments.iter().filter(|s| s.is_rendered()).count();

        let no_audio = || {
            SkitServiceError::Assembly(if eligible == 0 {
                "No audio produced: none of the script's speakers have a voice assigned."
                    .to_string()
            } else {
                format!(
                    "No audio produced: all {} lines failed to synthesize.",
                    eligible
                )
            })
        };

        if returned == 0 {
            return Err(no_audio());
        }

        let audio = match self.assembler.assemble_segments(segments) {
            Ok(audio) => audio,
            Err(AudioError::NoSegments) => return Err(no_audio()),
            Err(e) => return Err(e.into()),
        };

        // Lines shorter than one frame are dropped by the assembler
        let rendered = audio.segment_count;
        if rendered < eligible {
            tracing::warn!(
                rendered = rendered,
                eligible = eligible,
                "Some lines failed and were left out of the skit"
            );
        }

        Ok((audio, rendered, skipped_speakers))
    }
}
