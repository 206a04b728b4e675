use std::time::Duration;
use async_trait::async_trait;
use serde::Serialize;
use reqwest::Client;
use log::error;

use crate::errors::ProviderError;
use super::{SpeechClip, SpeechProvider};

/// OpenAI client for the speech synthesis endpoint
#[derive(Debug, Clone)]
pub struct OpenAiSpeech {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to public API)
    endpoint: String,
}

/// OpenAI speech request
#[derive(Debug, Clone, Serialize)]
pub struct OpenAiSpeechRequest {
    /// The model to use
    model: String,

    /// The text to speak
    input: String,

    /// The voice to render with
    voice: String,

    /// Audio container format
    response_format: String,
}

impl OpenAiSpeechRequest {
    /// Create a new speech request, rendered as MP3
    pub fn new(input: impl Into<String>, voice: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            input: input.into(),
            voice: voice.into(),
            response_format: "mp3".to_string(),
        }
    }
}

impl OpenAiSpeech {
    /// Create a new OpenAI speech client
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

    fn base_url(&self) -> String {
        if self.endpoint.is_empty() {
            "https://api.openai.com".to_string()
        } else {
            self.endpoint.trim_end_matches('/').to_string()
        }
    }
}

#[async_trait]
impl SpeechProvider for OpenAiSpeech {
    type Request = OpenAiSpeechRequest;

    async fn synthesize(&self, request: OpenAiSpeechRequest) -> Result<SpeechClip, ProviderError> {
        let url = format!("{}/v1/audio/speech", self.base_url());

        let response = self.client.post(&url)
            .header("Content-Type", "application/json")
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("OpenAI request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("OpenAI API error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let audio = response.bytes().await
            .map_err(|e| ProviderError::ParseError(format!("Failed to read audio body: {}", e)))?;

        if audio.is_empty() {
            return Err(ProviderError::EmptyAudio(format!("no audio for voice {}", request.voice)));
        }

        Ok(SpeechClip { audio })
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let response = self.client.get(format!("{}/v1/models", self.base_url()))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("OpenAI connection test failed: {}", e)))?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(ProviderError::AuthenticationError(format!("OpenAI rejected the API key ({})", status)));
        }
        if !status.is_success() {
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: "OpenAI connection test failed".to_string(),
            });
        }

        Ok(())
    }
}
