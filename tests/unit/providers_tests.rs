/*!
 * Tests for speech provider implementations
 */

use narravid::errors::ProviderError;
use narravid::providers::SpeechProvider;
use narravid::providers::elevenlabs::ElevenLabsRequest;
use narravid::providers::openai::OpenAiSpeechRequest;
use narravid::providers::mock::{MockSpeech, MockSpeechRequest};

/// Test ElevenLabs request body serialization
#[test]
fn test_elevenlabs_request_withSerialization_shouldOmitVoiceId() {
    let request = ElevenLabsRequest::new("Giriş yapılıyor", "voice-123", "eleven_multilingual_v2");
    let body = serde_json::to_value(&request).unwrap();

    assert_eq!(body["text"], "Giriş yapılıyor");
    assert_eq!(body["model_id"], "eleven_multilingual_v2");

    // The voice travels in the URL, never in the body
    assert!(body.get("voice_id").is_none());

    // Default voice settings
    assert_eq!(body["voice_settings"]["stability"], 0.5);
    assert_eq!(body["voice_settings"]["similarity_boost"], 0.5);
}

/// Test OpenAI request body serialization
#[test]
fn test_openai_request_withSerialization_shouldIncludeAllFields() {
    let request = OpenAiSpeechRequest::new("Tıklıyoruz", "alloy", "gpt-4o-mini-tts");
    let body = serde_json::to_value(&request).unwrap();

    assert_eq!(body["input"], "Tıklıyoruz");
    assert_eq!(body["voice"], "alloy");
    assert_eq!(body["model"], "gpt-4o-mini-tts");
    assert_eq!(body["response_format"], "mp3");
}

/// Test the working mock provider
#[tokio::test]
async fn test_mock_provider_withWorkingBehavior_shouldReturnDeterministicAudio() {
    let provider = MockSpeech::working();
    let request = MockSpeechRequest::new("Bekliyoruz", "test-voice");

    let clip = provider.synthesize(request.clone()).await.unwrap();

    assert_eq!(clip.audio, MockSpeech::audio_for(&request));
    assert_eq!(clip.audio, "MOCKAUDIO[test-voice]:Bekliyoruz");
    assert_eq!(provider.request_count(), 1);
    assert!(provider.test_connection().await.is_ok());
}

/// Test the always-failing mock provider
#[tokio::test]
async fn test_mock_provider_withFailingBehavior_shouldAlwaysError() {
    let provider = MockSpeech::failing();

    let result = provider.synthesize(MockSpeechRequest::new("text", "voice")).await;
    assert!(matches!(result, Err(ProviderError::RequestFailed(_))));
    assert!(provider.test_connection().await.is_err());
}

/// Test the intermittent mock provider failure cadence
#[tokio::test]
async fn test_mock_provider_withIntermittentBehavior_shouldFailEverySecondRequest() {
    let provider = MockSpeech::intermittent(2);

    let mut outcomes = Vec::new();
    for i in 0..4 {
        let request = MockSpeechRequest::new(format!("cue {}", i), "voice");
        outcomes.push(provider.synthesize(request).await.is_ok());
    }

    assert_eq!(outcomes, vec![true, false, true, false]);
    assert_eq!(provider.request_count(), 4);
}

/// Test the empty-audio mock provider
#[tokio::test]
async fn test_mock_provider_withEmptyBehavior_shouldReportEmptyAudio() {
    let provider = MockSpeech::empty();

    let result = provider.synthesize(MockSpeechRequest::new("text", "voice")).await;
    assert!(matches!(result, Err(ProviderError::EmptyAudio(_))));
}

/// Test that cloned mocks share their request counter
#[tokio::test]
async fn test_mock_provider_withClones_shouldShareRequestCounter() {
    let provider = MockSpeech::working();
    let clone = provider.clone();

    clone.synthesize(MockSpeechRequest::new("a", "v")).await.unwrap();
    clone.synthesize(MockSpeechRequest::new("b", "v")).await.unwrap();

    assert_eq!(provider.request_count(), 2);
}
