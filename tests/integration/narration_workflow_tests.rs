/*!
 * Integration tests for narration synthesis and assembly
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use anyhow::Result;
use tokio_test;

use narravid::narration::{NarrationAssembler, SpeechBackend};
use narravid::providers::mock::MockSpeech;
use narravid::timeline::{Cue, CueKind, Timeline};
use crate::common;

fn sample_timeline() -> Timeline {
    Timeline::from_cues(vec![
        Cue::new(0.0, 2.0, "Test: should log in".to_string(), CueKind::Title),
        Cue::new(2.0, 3.0, "Giriş formunu dolduruyoruz".to_string(), CueKind::Comment),
        Cue::new(5.0, 2.0, "Tıklıyoruz".to_string(), CueKind::Action),
        Cue::new(7.0, 2.0, "Doğrulama yapıyoruz".to_string(), CueKind::Action),
    ])
}

/// Test that concurrent synthesis preserves cue order in the clip list
#[tokio::test]
async fn test_synthesize_clips_withWorkingBackend_shouldPreserveCueOrder() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let timeline = sample_timeline();

    let backend = SpeechBackend::mock(MockSpeech::working(), "test-voice");
    let assembler = NarrationAssembler::new(backend, 4);

    let clips = assembler
        .synthesize_clips(&timeline, temp_dir.path(), |_, _| {})
        .await?;

    assert_eq!(clips.len(), 4);

    // Clip N holds the audio of cue N even though requests ran concurrently
    for (index, (clip_path, cue)) in clips.iter().zip(timeline.cues()).enumerate() {
        assert_eq!(
            clip_path.file_name().unwrap().to_string_lossy(),
            format!("clip_{:03}.mp3", index)
        );

        let audio = std::fs::read(clip_path)?;
        let expected = format!("MOCKAUDIO[test-voice]:{}", cue.text);
        assert_eq!(audio, expected.as_bytes());
    }

    Ok(())
}

/// Test that failed cues are skipped without aborting the batch
#[tokio::test]
async fn test_synthesize_clips_withIntermittentFailures_shouldSkipFailedCues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let timeline = sample_timeline();

    // Every second request fails, so 2 of 4 cues produce no clip
    let backend = SpeechBackend::mock(MockSpeech::intermittent(2), "test-voice");
    let assembler = NarrationAssembler::new(backend, 1);

    let clips = assembler
        .synthesize_clips(&timeline, temp_dir.path(), |_, _| {})
        .await?;

    assert_eq!(clips.len(), 2);
    for clip_path in &clips {
        assert!(clip_path.exists());
    }

    Ok(())
}

/// Test that the progress callback sees every cue complete
#[tokio::test]
async fn test_synthesize_clips_withProgressCallback_shouldReportAllCompletions() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let timeline = sample_timeline();

    let backend = SpeechBackend::mock(MockSpeech::working(), "test-voice");
    let assembler = NarrationAssembler::new(backend, 2);

    let seen = Arc::new(AtomicUsize::new(0));
    let seen_in_callback = seen.clone();

    assembler
        .synthesize_clips(&timeline, temp_dir.path(), move |completed, total| {
            assert!(completed <= total);
            seen_in_callback.fetch_max(completed, Ordering::SeqCst);
        })
        .await?;

    assert_eq!(seen.load(Ordering::SeqCst), timeline.len());

    Ok(())
}

/// Test assembling when every synthesis request fails
#[tokio::test]
async fn test_assemble_withFailingBackend_shouldReturnNone() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let timeline = sample_timeline();

    let backend = SpeechBackend::mock(MockSpeech::failing(), "test-voice");
    let assembler = NarrationAssembler::new(backend, 2);

    let track_path = temp_dir.path().join("narration.mp3");
    let result = assembler
        .assemble(&timeline, temp_dir.path(), &track_path, |_, _| {})
        .await?;

    // The caller degrades to a subtitle-only video in this case
    assert!(result.is_none());
    assert!(!track_path.exists());

    Ok(())
}

/// Test assembling an empty timeline
#[test]
fn test_assemble_withEmptyTimeline_shouldReturnNone() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let backend = SpeechBackend::mock(MockSpeech::working(), "test-voice");
    let assembler = NarrationAssembler::new(backend, 2);

    let track_path = temp_dir.path().join("narration.mp3");
    let result = tokio_test::block_on(async {
        assembler
            .assemble(&Timeline::empty(), temp_dir.path(), &track_path, |_, _| {})
            .await
    })?;

    assert!(result.is_none());

    Ok(())
}

/// Test the mock backend connection probe
#[test]
fn test_backend_connection_withMockBackend_shouldSucceed() {
    let backend = SpeechBackend::mock(MockSpeech::working(), "test-voice");

    let result = tokio_test::block_on(async {
        backend.test_connection().await
    });

    assert!(result.is_ok());
    assert_eq!(backend.display_name(), "Mock");
}
