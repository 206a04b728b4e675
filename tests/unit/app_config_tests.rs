/*!
 * Tests for application configuration functionality
 */

use std::str::FromStr;
use narravid::app_config::{Config, CueMode, TtsProvider, ProviderConfig, LogLevel};

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.narration_language, "tr");
    assert_eq!(config.cue_source, CueMode::Pattern);
    assert_eq!(config.narration.provider, TtsProvider::ElevenLabs);
    assert_eq!(config.log_level, LogLevel::Info);

    // Both providers are pre-populated with their defaults
    assert_eq!(config.narration.available_providers.len(), 2);
    assert_eq!(config.narration.get_model(), "eleven_multilingual_v2");
    assert_eq!(config.narration.get_voice(), "21m00Tcm4TlvDq8ikWAM");
    assert_eq!(config.narration.get_endpoint(), "https://api.elevenlabs.io");
    assert_eq!(config.narration.optimal_concurrent_requests(), 4);
    assert_eq!(config.narration.get_timeout_secs(), 30);
}

/// Test provider getters after switching the active provider
#[test]
fn test_narration_config_withOpenAiProvider_shouldUseOpenAiDefaults() {
    let mut config = Config::default();
    config.narration.provider = TtsProvider::OpenAI;

    assert_eq!(config.narration.get_model(), "gpt-4o-mini-tts");
    assert_eq!(config.narration.get_voice(), "alloy");
    assert_eq!(config.narration.get_endpoint(), "https://api.openai.com");
}

/// Test that empty per-provider fields fall back to built-in defaults
#[test]
fn test_narration_config_withEmptyFields_shouldFallBackToDefaults() {
    let mut config = Config::default();
    if let Some(provider_config) = config.narration.available_providers.iter_mut()
        .find(|p| p.provider_type == "elevenlabs") {
        provider_config.model = String::new();
        provider_config.voice = String::new();
    }

    assert_eq!(config.narration.get_model(), "eleven_multilingual_v2");
    assert_eq!(config.narration.get_voice(), "21m00Tcm4TlvDq8ikWAM");
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    // Empty narration language
    config.narration_language = String::new();
    assert!(config.validate().is_err());
    config.narration_language = "tr".to_string();

    // Active provider without a matching provider config
    config.narration.available_providers = vec![ProviderConfig::new(TtsProvider::OpenAI)];
    config.narration.provider = TtsProvider::ElevenLabs;
    assert!(config.validate().is_err());

    config.narration.provider = TtsProvider::OpenAI;
    assert!(config.validate().is_ok());
}

/// Test JSON serialization round trip
#[test]
fn test_config_serialization_withRoundTrip_shouldPreserveValues() {
    let mut config = Config::default();
    config.narration.provider = TtsProvider::OpenAI;
    config.cue_source = CueMode::Static;
    config.log_level = LogLevel::Debug;

    let json = serde_json::to_string_pretty(&config).unwrap();
    assert!(json.contains("\"provider\": \"openai\""));
    assert!(json.contains("\"cue_source\": \"static\""));

    let parsed: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.narration.provider, TtsProvider::OpenAI);
    assert_eq!(parsed.cue_source, CueMode::Static);
    assert_eq!(parsed.log_level, LogLevel::Debug);
    assert_eq!(parsed.narration_language, "tr");
}

/// Test that omitted optional fields deserialize to defaults
#[test]
fn test_config_deserialization_withMinimalJson_shouldUseDefaults() {
    let json = r#"{
        "narration_language": "tr",
        "narration": { "provider": "elevenlabs" }
    }"#;

    let config: Config = serde_json::from_str(json).unwrap();
    assert_eq!(config.cue_source, CueMode::Pattern);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.narration.available_providers.is_empty());

    // Getters fall back to built-in defaults when no provider entry exists
    assert_eq!(config.narration.get_voice(), "21m00Tcm4TlvDq8ikWAM");
}

/// Test string conversions of the provider enum
#[test]
fn test_tts_provider_withStringConversions_shouldRoundTrip() {
    assert_eq!(TtsProvider::ElevenLabs.to_string(), "elevenlabs");
    assert_eq!(TtsProvider::OpenAI.to_string(), "openai");
    assert_eq!(TtsProvider::ElevenLabs.display_name(), "ElevenLabs");

    assert_eq!(TtsProvider::from_str("elevenlabs").unwrap(), TtsProvider::ElevenLabs);
    assert_eq!(TtsProvider::from_str("OpenAI").unwrap(), TtsProvider::OpenAI);
    assert!(TtsProvider::from_str("espeak").is_err());
}

/// Test string conversions of the cue mode enum
#[test]
fn test_cue_mode_withStringConversions_shouldRoundTrip() {
    assert_eq!(CueMode::Pattern.to_string(), "pattern");
    assert_eq!(CueMode::Static.to_string(), "static");

    assert_eq!(CueMode::from_str("pattern").unwrap(), CueMode::Pattern);
    assert_eq!(CueMode::from_str("STATIC").unwrap(), CueMode::Static);
    assert!(CueMode::from_str("dynamic").is_err());
}
