/*!
 * Mock provider implementation for testing.
 *
 * This module provides a mock speech provider that simulates different behaviors:
 * - `MockSpeech::working()` - Always succeeds with deterministic audio bytes
 * - `MockSpeech::intermittent(n)` - Fails every nth request
 * - `MockSpeech::failing()` - Always fails with an error
 */

use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use super::{SpeechClip, SpeechProvider};

/// Mock synthesis request
#[derive(Debug, Clone)]
pub struct MockSpeechRequest {
    /// The text to speak
    pub text: String,
    /// Voice identifier
    pub voice: String,
}

impl MockSpeechRequest {
    /// Create a new mock request
    pub fn new(text: impl Into<String>, voice: impl Into<String>) -> Self {
        Self { text: text.into(), voice: voice.into() }
    }
}

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with deterministic audio bytes
    Working,
    /// Fails intermittently (every Nth request)
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
    /// Returns an empty audio body
    Empty,
    /// Simulates slow synthesis (for timeout testing)
    Slow { delay_ms: u64 },
}

/// Mock provider for testing narration assembly behavior
#[derive(Debug, Clone)]
pub struct MockSpeech {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter for intermittent failures
    request_count: Arc<AtomicUsize>,
}

impl MockSpeech {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create an intermittently failing mock provider
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that returns empty audio bodies
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Create a slow mock for timeout testing
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Number of synthesis requests seen so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Deterministic audio bytes for a request, so tests can assert which
    /// text produced which clip
    pub fn audio_for(request: &MockSpeechRequest) -> Bytes {
        Bytes::from(format!("MOCKAUDIO[{}]:{}", request.voice, request.text))
    }
}

#[async_trait]
impl SpeechProvider for MockSpeech {
    type Request = MockSpeechRequest;

    async fn synthesize(&self, request: MockSpeechRequest) -> Result<SpeechClip, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst) + 1;

        match self.behavior {
            MockBehavior::Working => Ok(SpeechClip { audio: Self::audio_for(&request) }),
            MockBehavior::Intermittent { fail_every } => {
                if fail_every > 0 && count % fail_every == 0 {
                    Err(ProviderError::RequestFailed(format!(
                        "mock intermittent failure on request {}", count
                    )))
                } else {
                    Ok(SpeechClip { audio: Self::audio_for(&request) })
                }
            }
            MockBehavior::Failing => Err(ProviderError::RequestFailed(
                "mock provider always fails".to_string()
            )),
            MockBehavior::Empty => Err(ProviderError::EmptyAudio(
                format!("mock returned no audio for '{}'", request.text)
            )),
            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
                Ok(SpeechClip { audio: Self::audio_for(&request) })
            }
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::RequestFailed(
                "mock provider always fails".to_string()
            )),
            _ => Ok(()),
        }
    }
}
