use std::fmt;
use anyhow::{Result, anyhow};

// @module: Narration timeline primitives

// @enum: What a cue was extracted from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueKind {
    // @kind: Block title announcement
    Title,

    // @kind: Narrated inline comment
    Comment,

    // @kind: Explanation of a recognized action call
    Action,
}

// @struct: Single timed narration/subtitle unit
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    // @field: Offset on the timeline in seconds
    pub start: f64,

    // @field: Display/narration length in seconds
    pub duration: f64,

    // @field: Rendered narration text
    pub text: String,

    // @field: Cue origin, kept for traceability
    pub kind: CueKind,
}

impl Cue {
    /// Creates a new cue - used by tests and external consumers
    #[allow(dead_code)]
    pub fn new(start: f64, duration: f64, text: String, kind: CueKind) -> Self {
        Cue { start, duration, text, kind }
    }

    // @creates: Validated cue
    // @validates: Non-negative start, positive duration, non-empty text
    pub fn new_validated(start: f64, duration: f64, text: String, kind: CueKind) -> Result<Self> {
        if !start.is_finite() || start < 0.0 {
            return Err(anyhow!("Invalid cue start: {}", start));
        }

        if !duration.is_finite() || duration <= 0.0 {
            return Err(anyhow!("Invalid cue duration: {}", duration));
        }

        let trimmed_text = text.trim();
        if trimmed_text.is_empty() {
            return Err(anyhow!("Empty cue text at start {}", start));
        }

        Ok(Cue {
            start,
            duration,
            text: trimmed_text.to_string(),
            kind,
        })
    }

    /// End of the cue on the timeline, in seconds
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{:.2}s +{:.2}s] {}", self.start, self.duration, self.text)
    }
}

/// Ordered, immutable sequence of cues.
///
/// A timeline is built once by the cue extractor and never mutated in place;
/// the only derived form is a rescaled copy produced by `rescale`.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    /// Cues in non-decreasing start order
    cues: Vec<Cue>,
}

impl Timeline {
    /// Create an empty timeline
    pub fn empty() -> Self {
        Timeline { cues: Vec::new() }
    }

    /// Create a timeline from an already-ordered cue list
    pub fn from_cues(cues: Vec<Cue>) -> Self {
        Timeline { cues }
    }

    /// Cues in timeline order
    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    /// Number of cues
    pub fn len(&self) -> usize {
        self.cues.len()
    }

    /// Whether the timeline has no cues
    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Total span in seconds: end of the last cue, or 0 when empty
    pub fn total_span(&self) -> f64 {
        self.cues.last().map_or(0.0, |cue| cue.end())
    }

    /// Produce a new timeline with every start and duration multiplied
    /// by `factor`. Cue count, order and text are preserved; the receiver
    /// is left untouched.
    pub fn rescale(&self, factor: f64) -> Timeline {
        let cues = self.cues.iter()
            .map(|cue| Cue {
                start: cue.start * factor,
                duration: cue.duration * factor,
                text: cue.text.clone(),
                kind: cue.kind,
            })
            .collect();

        Timeline { cues }
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Timeline")?;
        writeln!(f, "Cues: {}", self.cues.len())?;
        writeln!(f, "Span: {:.2}s", self.total_span())?;
        Ok(())
    }
}
