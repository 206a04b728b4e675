use std::time::Duration;
use async_trait::async_trait;
use serde::Serialize;
use reqwest::Client;
use log::error;

use crate::errors::ProviderError;
use super::{SpeechClip, SpeechProvider};

/// ElevenLabs client for the text-to-speech API
#[derive(Debug, Clone)]
pub struct ElevenLabs {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to public API)
    endpoint: String,
}

/// ElevenLabs synthesis request
#[derive(Debug, Clone, Serialize)]
pub struct ElevenLabsRequest {
    /// Text to speak
    text: String,

    /// Model identifier
    model_id: String,

    /// Voice identifier, part of the request URL rather than the body
    #[serde(skip_serializing)]
    voice_id: String,

    /// Voice rendering parameters
    voice_settings: VoiceSettings,
}

/// ElevenLabs voice settings
#[derive(Debug, Clone, Serialize)]
pub struct VoiceSettings {
    /// Voice stability, 0.0 - 1.0
    stability: f32,

    /// Similarity boost, 0.0 - 1.0
    similarity_boost: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.5,
        }
    }
}

impl ElevenLabsRequest {
    /// Create a new synthesis request
    pub fn new(text: impl Into<String>, voice_id: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model_id: model_id.into(),
            voice_id: voice_id.into(),
            voice_settings: VoiceSettings::default(),
        }
    }

    /// Set the voice settings
    pub fn voice_settings(mut self, stability: f32, similarity_boost: f32) -> Self {
        self.voice_settings = VoiceSettings { stability, similarity_boost };
        self
    }
}

impl ElevenLabs {
    /// Create a new ElevenLabs client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    fn synthesis_url(&self, voice_id: &str) -> String {
        let base = if self.endpoint.is_empty() {
            "https://api.elevenlabs.io"
        } else {
            self.endpoint.trim_end_matches('/')
        };
        format!("{}/v1/text-to-speech/{}", base, voice_id)
    }
}

#[async_trait]
impl SpeechProvider for ElevenLabs {
    type Request = ElevenLabsRequest;

    async fn synthesize(&self, request: ElevenLabsRequest) -> Result<SpeechClip, ProviderError> {
        let url = self.synthesis_url(&request.voice_id);

        let response = self.client.post(&url)
            .header("Accept", "audio/mpeg")
            .header("Content-Type", "application/json")
            .header("xi-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("ElevenLabs request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("ElevenLabs API error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let audio = response.bytes().await
            .map_err(|e| ProviderError::ParseError(format!("Failed to read audio body: {}", e)))?;

        if audio.is_empty() {
            return Err(ProviderError::EmptyAudio(format!("no audio for voice {}", request.voice_id)));
        }

        Ok(SpeechClip { audio })
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let base = if self.endpoint.is_empty() {
            "https://api.elevenlabs.io".to_string()
        } else {
            self.endpoint.trim_end_matches('/').to_string()
        };

        let response = self.client.get(format!("{}/v1/voices", base))
            .header("xi-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("ElevenLabs connection test failed: {}", e)))?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(ProviderError::AuthenticationError(format!("ElevenLabs rejected the API key ({})", status)));
        }
        if !status.is_success() {
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: "ElevenLabs connection test failed".to_string(),
            });
        }

        Ok(())
    }
}
