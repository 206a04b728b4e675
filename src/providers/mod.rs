/*!
 * Provider implementations for speech synthesis services.
 *
 * This module contains client implementations for the supported TTS backends:
 * - ElevenLabs: hosted multilingual TTS API
 * - OpenAI: speech endpoint (`/v1/audio/speech`)
 * - Mock: deterministic in-process provider for tests
 */

use async_trait::async_trait;
use bytes::Bytes;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// One synthesized audio clip, as returned by a provider
#[derive(Debug, Clone)]
pub struct SpeechClip {
    /// Encoded audio bytes (MP3)
    pub audio: Bytes,
}

/// Common trait for all speech synthesis providers
///
/// This trait defines the interface that all provider implementations must
/// follow, allowing them to be used interchangeably by the narration
/// assembler. Clip duration is unknown until the written file is probed.
#[async_trait]
pub trait SpeechProvider: Send + Sync + Debug {
    /// The request type for this provider
    type Request: Send + Sync;

    /// Synthesize one clip of speech from a request
    ///
    /// # Arguments
    /// * `request` - The synthesis request
    ///
    /// # Returns
    /// * `Result<SpeechClip, ProviderError>` - The audio clip or an error
    async fn synthesize(&self, request: Self::Request) -> Result<SpeechClip, ProviderError>;

    /// Test the connection to the provider
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the connection is usable, or an error
    async fn test_connection(&self) -> Result<(), ProviderError>;
}

pub mod elevenlabs;
pub mod openai;
pub mod mock;
