use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use anyhow::Result;
use futures::stream::{self, StreamExt};
use log::{warn, info, debug};

use crate::app_config::{NarrationConfig, TtsProvider};
use crate::errors::ProviderError;
use crate::media;
use crate::providers::{SpeechClip, SpeechProvider};
use crate::providers::elevenlabs::{ElevenLabs, ElevenLabsRequest};
use crate::providers::openai::{OpenAiSpeech, OpenAiSpeechRequest};
use crate::providers::mock::{MockSpeech, MockSpeechRequest};
use crate::timeline::Timeline;

// @module: Narration synthesis and track assembly

/// Configured speech backend, dispatching to one concrete provider
#[derive(Debug, Clone)]
pub enum SpeechBackend {
    /// ElevenLabs text-to-speech
    ElevenLabs {
        client: ElevenLabs,
        voice: String,
        model: String,
    },
    /// OpenAI speech endpoint
    OpenAi {
        client: OpenAiSpeech,
        voice: String,
        model: String,
    },
    /// Deterministic in-process provider for tests
    Mock {
        client: MockSpeech,
        voice: String,
    },
}

impl SpeechBackend {
    /// Build the backend selected by the narration configuration
    pub fn from_config(config: &NarrationConfig) -> Self {
        let voice = config.get_voice();
        let model = config.get_model();
        let api_key = config.get_api_key();
        let endpoint = config.get_endpoint();
        let timeout_secs = config.get_timeout_secs();

        match config.provider {
            TtsProvider::ElevenLabs => SpeechBackend::ElevenLabs {
                client: ElevenLabs::new(api_key, endpoint, timeout_secs),
                voice,
                model,
            },
            TtsProvider::OpenAI => SpeechBackend::OpenAi {
                client: OpenAiSpeech::new(api_key, endpoint, timeout_secs),
                voice,
                model,
            },
        }
    }

    /// Mock backend for tests
    pub fn mock(client: MockSpeech, voice: impl Into<String>) -> Self {
        SpeechBackend::Mock { client, voice: voice.into() }
    }

    /// Synthesize one clip of speech for a cue's text
    pub async fn synthesize_text(&self, text: &str) -> Result<SpeechClip, ProviderError> {
        match self {
            SpeechBackend::ElevenLabs { client, voice, model } => {
                client.synthesize(ElevenLabsRequest::new(text, voice, model)).await
            }
            SpeechBackend::OpenAi { client, voice, model } => {
                client.synthesize(OpenAiSpeechRequest::new(text, voice, model)).await
            }
            SpeechBackend::Mock { client, voice } => {
                client.synthesize(MockSpeechRequest::new(text, voice)).await
            }
        }
    }

    /// Test the connection to the underlying provider
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        match self {
            SpeechBackend::ElevenLabs { client, .. } => client.test_connection().await,
            SpeechBackend::OpenAi { client, .. } => client.test_connection().await,
            SpeechBackend::Mock { client, .. } => client.test_connection().await,
        }
    }

    /// Display name of the underlying provider
    pub fn display_name(&self) -> &str {
        match self {
            SpeechBackend::ElevenLabs { .. } => "ElevenLabs",
            SpeechBackend::OpenAi { .. } => "OpenAI",
            SpeechBackend::Mock { .. } => "Mock",
        }
    }
}

/// Result of assembling a narration track
#[derive(Debug)]
pub struct AssembledNarration {
    /// Path of the concatenated narration track
    pub track_path: PathBuf,

    /// Number of clips that made it into the track
    pub clip_count: usize,

    /// Number of cues whose synthesis failed and was skipped
    pub skipped: usize,
}

/// Turns a timeline's cue texts into one concatenated narration track
pub struct NarrationAssembler {
    /// Configured speech backend
    backend: SpeechBackend,

    /// Maximum number of concurrent synthesis requests
    max_concurrent_requests: usize,
}

impl NarrationAssembler {
    /// Create a new assembler
    pub fn new(backend: SpeechBackend, max_concurrent_requests: usize) -> Self {
        Self {
            backend,
            max_concurrent_requests: max_concurrent_requests.max(1),
        }
    }

    /// Synthesize one clip per cue into `clip_dir`.
    ///
    /// Requests run with bounded concurrency but the returned paths are in
    /// original cue order regardless of completion order, since downstream
    /// duration math assumes order-preserving concatenation. A failed
    /// synthesis skips that cue's clip (the timeline entry is kept) and the
    /// pipeline continues with one fewer clip.
    pub async fn synthesize_clips(
        &self,
        timeline: &Timeline,
        clip_dir: &Path,
        progress_callback: impl Fn(usize, usize) + Clone + Send + 'static,
    ) -> Result<Vec<PathBuf>> {
        let total = timeline.len();
        let completed = Arc::new(AtomicUsize::new(0));

        let mut results: Vec<(usize, Option<PathBuf>)> = stream::iter(timeline.cues().iter().enumerate())
            .map(|(index, cue)| {
                let backend = self.backend.clone();
                let clip_path = clip_dir.join(format!("clip_{:03}.mp3", index));
                let completed = completed.clone();
                let progress_callback = progress_callback.clone();
                let text = cue.text.clone();

                async move {
                    let result = backend.synthesize_text(&text).await;

                    let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                    progress_callback(done, total);

                    match result {
                        Ok(clip) => match tokio::fs::write(&clip_path, &clip.audio).await {
                            Ok(()) => {
                                debug!("Synthesized clip {} ({} bytes)", index + 1, clip.audio.len());
                                (index, Some(clip_path))
                            }
                            Err(e) => {
                                warn!("Failed to write clip {} to disk: {}", index + 1, e);
                                (index, None)
                            }
                        },
                        Err(e) => {
                            warn!("Synthesis failed for cue {} ('{}'): {}, skipping clip", index + 1, text, e);
                            (index, None)
                        }
                    }
                }
            })
            .buffer_unordered(self.max_concurrent_requests)
            .collect()
            .await;

        // Reassemble in cue order before concatenation
        results.sort_by_key(|(index, _)| *index);

        Ok(results.into_iter().filter_map(|(_, path)| path).collect())
    }

    /// Synthesize every cue and concatenate the clips into a single track.
    ///
    /// Returns `None` when no clip at all could be produced; the caller
    /// degrades to a subtitle-only output in that case.
    pub async fn assemble(
        &self,
        timeline: &Timeline,
        clip_dir: &Path,
        track_path: &Path,
        progress_callback: impl Fn(usize, usize) + Clone + Send + 'static,
    ) -> Result<Option<AssembledNarration>> {
        if timeline.is_empty() {
            warn!("Timeline has no cues, nothing to narrate");
            return Ok(None);
        }

        info!("Synthesizing {} narration clips ({})", timeline.len(), self.backend.display_name());
        let clips = self.synthesize_clips(timeline, clip_dir, progress_callback).await?;
        let skipped = timeline.len() - clips.len();

        if clips.is_empty() {
            warn!("No narration clips could be synthesized");
            return Ok(None);
        }

        if skipped > 0 {
            warn!("{} of {} cues produced no audio and were skipped", skipped, timeline.len());
        }

        media::concat_clips(&clips, track_path).await?;

        Ok(Some(AssembledNarration {
            track_path: track_path.to_path_buf(),
            clip_count: clips.len(),
            skipped,
        }))
    }
}
