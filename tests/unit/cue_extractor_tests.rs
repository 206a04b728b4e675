/*!
 * Tests for timed cue extraction
 */

use narravid::app_config::CueMode;
use narravid::script::extract_timeline;
use narravid::script::tables::{translate_comment, explain_action, STATIC_STEPS};
use narravid::timeline::CueKind;
use crate::common;

/// Test pattern extraction over the shared two-block script
#[test]
fn test_extract_timeline_withPatternMode_shouldEmitTitleCommentActionCues() {
    let timeline = extract_timeline(common::TEST_SCRIPT, &CueMode::Pattern);
    let cues = timeline.cues();

    // Block 1: title + 2 comments + 3 actions, block 2: title + 1 comment + 3 actions
    assert_eq!(timeline.len(), 11);

    assert_eq!(cues[0].text, "Test: should log in");
    assert_eq!(cues[0].kind, CueKind::Title);
    assert_eq!(cues[0].start, 0.0);
    assert_eq!(cues[0].duration, 2.0);

    // Comments come before actions within a block, in source order
    assert_eq!(cues[1].text, "Giriş sayfasında olduğumuzu doğruluyoruz");
    assert_eq!(cues[1].kind, CueKind::Comment);
    assert_eq!(cues[2].text, "Giriş formunu gönderiyoruz");

    assert_eq!(cues[3].text, "Sayfayı ziyaret ediyoruz");
    assert_eq!(cues[3].kind, CueKind::Action);
    assert_eq!(cues[4].text, "Element seçiyoruz");
    assert_eq!(cues[5].text, "Element seçiyoruz");
}

/// Test that the cue cursor leaves a one second gap between blocks
#[test]
fn test_extract_timeline_withTwoBlocks_shouldInsertGapBetweenBlocks() {
    let timeline = extract_timeline(common::TEST_SCRIPT, &CueMode::Pattern);
    let cues = timeline.cues();

    // Block 1 runs 0..14s (2 + 3 + 3 + 2 + 2 + 2), block 2 starts after a 1s gap
    assert_eq!(cues[5].end(), 14.0);
    assert_eq!(cues[6].start, 15.0);
    assert_eq!(cues[6].text, "Test: should add a patient");

    // Span is the end of the last cue, the trailing gap is not counted
    assert_eq!(timeline.total_span(), 26.0);
}

/// Test that unrecognized action verbs produce no cue
#[test]
fn test_extract_timeline_withUnknownVerb_shouldSkipIt() {
    let source = r#"it('mixed verbs', () => {
        cy.visit('/');
        cy.screenshot();
        cy.click();
    });"#;

    let timeline = extract_timeline(source, &CueMode::Pattern);
    let cues = timeline.cues();

    // Title + visit + click, screenshot has no explanation entry
    assert_eq!(timeline.len(), 3);
    assert_eq!(cues[1].text, "Sayfayı ziyaret ediyoruz");
    assert_eq!(cues[2].text, "Tıklıyoruz");
}

/// Test that source without blocks yields an empty timeline
#[test]
fn test_extract_timeline_withNoBlocks_shouldReturnEmptyTimeline() {
    let timeline = extract_timeline("const nothing = true;", &CueMode::Pattern);

    assert!(timeline.is_empty());
    assert_eq!(timeline.total_span(), 0.0);
}

/// Test the static cue source against the built-in step list
#[test]
fn test_extract_timeline_withStaticMode_shouldEmitBuiltInSteps() {
    let timeline = extract_timeline("ignored source", &CueMode::Static);
    let cues = timeline.cues();

    assert_eq!(timeline.len(), STATIC_STEPS.len());
    assert_eq!(cues[0].text, "Giriş yapılıyor");
    assert_eq!(cues[0].start, 0.0);
    assert_eq!(cues[0].duration, 3.0);

    // Steps are back to back with no gaps
    let expected_span: f64 = STATIC_STEPS.iter().map(|(_, d)| d).sum();
    assert_eq!(timeline.total_span(), expected_span);
    for window in cues.windows(2) {
        assert_eq!(window[0].end(), window[1].start);
    }
}

/// Test comment translation lookup rules
#[test]
fn test_translate_comment_withKnownAndUnknownComments_shouldTranslateOrPassThrough() {
    // Exact match
    assert_eq!(translate_comment("Login first"), "Önce giriş yapıyoruz");

    // Case-insensitive substring fallback
    assert_eq!(
        translate_comment("Now we login first before anything else"),
        "Önce giriş yapıyoruz"
    );
    assert_eq!(
        translate_comment("LOGIN FIRST"),
        "Önce giriş yapıyoruz"
    );

    // No entry: the annotation passes through unchanged
    assert_eq!(translate_comment("Check the footer"), "Check the footer");
}

/// Test action verb explanation lookup
#[test]
fn test_explain_action_withKnownAndUnknownVerbs_shouldBeExactMatchOnly() {
    assert_eq!(explain_action("visit"), Some("Sayfayı ziyaret ediyoruz"));
    assert_eq!(explain_action("should"), Some("Doğrulama yapıyoruz"));

    // No substring fallback for verbs
    assert_eq!(explain_action("visits"), None);
    assert_eq!(explain_action("screenshot"), None);
}
