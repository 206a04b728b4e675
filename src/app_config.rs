use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Narration language code (ISO)
    pub narration_language: String,

    /// How narration cues are produced from the test script
    #[serde(default)]
    pub cue_source: CueMode,

    /// Narration (TTS) config
    pub narration: NarrationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Cue source mode
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CueMode {
    // @mode: Pattern-driven extraction from test source
    #[default]
    Pattern,
    // @mode: Built-in hand-authored step list
    Static,
}

impl std::fmt::Display for CueMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pattern => write!(f, "pattern"),
            Self::Static => write!(f, "static"),
        }
    }
}

impl std::str::FromStr for CueMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pattern" => Ok(Self::Pattern),
            "static" => Ok(Self::Static),
            _ => Err(anyhow!("Invalid cue mode: {}", s)),
        }
    }
}

/// Speech synthesis provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TtsProvider {
    // @provider: ElevenLabs
    #[default]
    ElevenLabs,
    // @provider: OpenAI speech endpoint
    OpenAI,
}

impl TtsProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::ElevenLabs => "ElevenLabs",
            Self::OpenAI => "OpenAI",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::ElevenLabs => "elevenlabs".to_string(),
            Self::OpenAI => "openai".to_string(),
        }
    }
}

// Implement Display trait for TtsProvider
impl std::fmt::Display for TtsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for TtsProvider
impl std::str::FromStr for TtsProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "elevenlabs" => Ok(Self::ElevenLabs),
            "openai" => Ok(Self::OpenAI),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name
    #[serde(default = "String::new")]
    pub model: String,

    // @field: Voice identifier
    #[serde(default = "String::new")]
    pub voice: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Max concurrent synthesis requests
    #[serde(default = "default_concurrent_requests")]
    pub concurrent_requests: usize,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: TtsProvider) -> Self {
        match provider_type {
            TtsProvider::ElevenLabs => Self {
                provider_type: "elevenlabs".to_string(),
                model: default_elevenlabs_model(),
                voice: default_elevenlabs_voice(),
                api_key: String::new(),
                endpoint: default_elevenlabs_endpoint(),
                concurrent_requests: default_concurrent_requests(),
                timeout_secs: default_timeout_secs(),
            },
            TtsProvider::OpenAI => Self {
                provider_type: "openai".to_string(),
                model: default_openai_model(),
                voice: default_openai_voice(),
                api_key: String::new(),
                endpoint: default_openai_endpoint(),
                concurrent_requests: default_concurrent_requests(),
                timeout_secs: default_timeout_secs(),
            },
        }
    }
}

/// Narration (speech synthesis) configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NarrationConfig {
    /// Speech provider to use
    #[serde(default)]
    pub provider: TtsProvider,

    /// Available speech providers
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,
}

impl NarrationConfig {
    /// Get the configuration of the active provider
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        let provider_str = self.provider.to_lowercase_string();
        self.available_providers.iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Get the model for the active provider
    pub fn get_model(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.model.is_empty() {
                return provider_config.model.clone();
            }
        }

        match self.provider {
            TtsProvider::ElevenLabs => default_elevenlabs_model(),
            TtsProvider::OpenAI => default_openai_model(),
        }
    }

    /// Get the voice for the active provider
    pub fn get_voice(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.voice.is_empty() {
                return provider_config.voice.clone();
            }
        }

        match self.provider {
            TtsProvider::ElevenLabs => default_elevenlabs_voice(),
            TtsProvider::OpenAI => default_openai_voice(),
        }
    }

    /// Get the API key for the active provider
    pub fn get_api_key(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.api_key.is_empty() {
                return provider_config.api_key.clone();
            }
        }

        String::new()
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.endpoint.is_empty() {
                return provider_config.endpoint.clone();
            }
        }

        match self.provider {
            TtsProvider::ElevenLabs => default_elevenlabs_endpoint(),
            TtsProvider::OpenAI => default_openai_endpoint(),
        }
    }

    /// Get the concurrent request limit for the active provider
    pub fn optimal_concurrent_requests(&self) -> usize {
        if let Some(provider_config) = self.get_active_provider_config() {
            if provider_config.concurrent_requests > 0 {
                return provider_config.concurrent_requests;
            }
        }

        default_concurrent_requests()
    }

    /// Get the request timeout for the active provider
    pub fn get_timeout_secs(&self) -> u64 {
        if let Some(provider_config) = self.get_active_provider_config() {
            if provider_config.timeout_secs > 0 {
                return provider_config.timeout_secs;
            }
        }

        default_timeout_secs()
    }
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            provider: TtsProvider::default(),
            available_providers: vec![
                ProviderConfig::new(TtsProvider::ElevenLabs),
                ProviderConfig::new(TtsProvider::OpenAI),
            ],
        }
    }
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_concurrent_requests() -> usize {
    4
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_elevenlabs_model() -> String {
    "eleven_multilingual_v2".to_string()
}

fn default_elevenlabs_voice() -> String {
    "21m00Tcm4TlvDq8ikWAM".to_string()
}

fn default_elevenlabs_endpoint() -> String {
    "https://api.elevenlabs.io".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o-mini-tts".to_string()
}

fn default_openai_voice() -> String {
    "alloy".to_string()
}

fn default_openai_endpoint() -> String {
    "https://api.openai.com".to_string()
}

fn default_narration_language() -> String {
    "tr".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            narration_language: default_narration_language(),
            cue_source: CueMode::default(),
            narration: NarrationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.narration_language.is_empty() {
            return Err(anyhow!("Narration language must not be empty"));
        }

        let provider_str = self.narration.provider.to_lowercase_string();
        if !self.narration.available_providers.is_empty()
            && self.narration.get_active_provider_config().is_none()
        {
            return Err(anyhow!(
                "No configuration found for the selected provider: {}",
                provider_str
            ));
        }

        if self.narration.get_voice().is_empty() {
            return Err(anyhow!("Narration voice must not be empty"));
        }

        Ok(())
    }
}
