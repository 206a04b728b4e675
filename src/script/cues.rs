use log::{warn, debug};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::app_config::CueMode;
use crate::timeline::{Cue, CueKind, Timeline};
use super::blocks::{Block, extract_blocks};
use super::tables;

// @module: Timed cue extraction

/// Duration of a block title cue, in seconds
pub const TITLE_CUE_SECS: f64 = 2.0;

/// Duration of a narrated comment cue, in seconds
pub const COMMENT_CUE_SECS: f64 = 3.0;

/// Duration of an action explanation cue, in seconds
pub const ACTION_CUE_SECS: f64 = 2.0;

/// Silence inserted after each block so consecutive tests stay audibly
/// separated, in seconds
pub const BLOCK_GAP_SECS: f64 = 1.0;

// @const: Inline annotation regex
static COMMENT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"//\s*(.+)").unwrap()
});

// @const: Action call regex, verb in capture group 1
static ACTION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"cy\.([A-Za-z_]+)\(").unwrap()
});

/// Running cursor that places each emitted cue immediately after the
/// previous one.
struct CueCursor {
    cues: Vec<Cue>,
    position: f64,
}

impl CueCursor {
    fn new() -> Self {
        CueCursor { cues: Vec::new(), position: 0.0 }
    }

    fn emit(&mut self, text: &str, duration: f64, kind: CueKind) {
        match Cue::new_validated(self.position, duration, text.to_string(), kind) {
            Ok(cue) => {
                self.position += duration;
                self.cues.push(cue);
            }
            Err(e) => {
                warn!("Skipping invalid cue at {:.2}s: {}", self.position, e);
            }
        }
    }

    fn gap(&mut self, seconds: f64) {
        self.position += seconds;
    }

    fn finish(self) -> Timeline {
        Timeline::from_cues(self.cues)
    }
}

/// Build a narration timeline from test source.
///
/// Both modes produce the same timeline shape (ordered cues with a running
/// start cursor), so downstream reconciliation and rendering never need to
/// know which one was used.
pub fn extract_timeline(source: &str, mode: &CueMode) -> Timeline {
    match mode {
        CueMode::Pattern => extract_pattern_timeline(source),
        CueMode::Static => static_timeline(),
    }
}

/// Pattern-driven extraction: one title cue per block, then translated
/// comment cues and action explanation cues in source order.
fn extract_pattern_timeline(source: &str) -> Timeline {
    let blocks = extract_blocks(source);
    let mut cursor = CueCursor::new();

    for block in &blocks {
        emit_block_cues(&mut cursor, block);
        cursor.gap(BLOCK_GAP_SECS);
    }

    let timeline = cursor.finish();
    debug!("Extracted {} cues from {} blocks", timeline.len(), blocks.len());
    timeline
}

fn emit_block_cues(cursor: &mut CueCursor, block: &Block) {
    if block.body.trim().is_empty() {
        warn!("Block '{}' has an empty body, emitting title only", block.label);
    }

    cursor.emit(&format!("Test: {}", block.label), TITLE_CUE_SECS, CueKind::Title);

    for captures in COMMENT_REGEX.captures_iter(&block.body) {
        if let Some(comment) = captures.get(1) {
            let translated = tables::translate_comment(comment.as_str().trim());
            cursor.emit(&translated, COMMENT_CUE_SECS, CueKind::Comment);
        }
    }

    for captures in ACTION_REGEX.captures_iter(&block.body) {
        let verb = captures.get(1).map_or("", |m| m.as_str());
        if let Some(explanation) = tables::explain_action(verb) {
            cursor.emit(explanation, ACTION_CUE_SECS, CueKind::Action);
        }
        // Unrecognized verbs are dropped silently, no cue emitted
    }
}

/// Static extraction: the built-in hand-authored step list, same cursor
/// rule as the pattern mode.
fn static_timeline() -> Timeline {
    let mut cursor = CueCursor::new();

    for (text, duration) in tables::STATIC_STEPS {
        cursor.emit(text, *duration, CueKind::Action);
    }

    cursor.finish()
}
