use log::{warn, debug};

// @module: Duration reconciliation between narration, subtitles and video

/// Lowest tempo factor one transform stage may carry.
/// The underlying `atempo` filter only behaves predictably in [0.5, 2.0].
pub const TEMPO_STAGE_MIN: f64 = 0.5;

/// Highest tempo factor one transform stage may carry
pub const TEMPO_STAGE_MAX: f64 = 2.0;

/// Reconciliation plan for one narration track.
///
/// `stages` composed in order equal the measured/target ratio (within the
/// two-decimal rounding each stage carries); `subtitle_scale` maps the
/// original cue timeline onto the target window independently of the audio
/// ratio. Constructed once per reconciliation and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationPlan {
    /// Ordered tempo-transform stages, each within [0.5, 2.0]
    pub stages: Vec<f64>,

    /// Scalar applied to every cue start/duration when rendering subtitles
    pub subtitle_scale: f64,
}

impl DurationPlan {
    /// Plan that leaves both the narration track and the timeline untouched
    pub fn passthrough() -> Self {
        DurationPlan { stages: Vec::new(), subtitle_scale: 1.0 }
    }

    /// Whether applying the plan's stages would change the audio at all
    pub fn is_passthrough(&self) -> bool {
        self.stages.is_empty() || self.stages.iter().all(|s| (s - 1.0).abs() < 1e-9)
    }

    /// Product of all stages, the overall tempo ratio the plan encodes
    pub fn composed_ratio(&self) -> f64 {
        self.stages.iter().product()
    }
}

/// Compute the plan that lands an assembled narration track and the cue
/// timeline inside the target window.
///
/// `measured_secs` is the probed length of the concatenated narration,
/// `target_secs` the reference video length, `timeline_span_secs` the end of
/// the last cue on the original, pre-stretch timeline. Degenerate inputs
/// never fail: a non-positive measured duration produces no stretch stages,
/// a non-positive target skips reconciliation entirely and keeps the
/// timeline unscaled.
pub fn reconcile(measured_secs: f64, target_secs: f64, timeline_span_secs: f64) -> DurationPlan {
    if !target_secs.is_finite() || target_secs <= 0.0 {
        warn!("Target duration unavailable ({}), skipping reconciliation", target_secs);
        return DurationPlan::passthrough();
    }

    let subtitle_scale = if timeline_span_secs.is_finite() && timeline_span_secs > 0.0 {
        target_secs / timeline_span_secs
    } else {
        warn!("Timeline span unavailable ({}), subtitles stay unscaled", timeline_span_secs);
        1.0
    };

    if !measured_secs.is_finite() || measured_secs <= 0.0 {
        warn!("Measured narration duration unavailable ({}), no tempo stages produced", measured_secs);
        return DurationPlan { stages: Vec::new(), subtitle_scale };
    }

    let ratio = measured_secs / target_secs;
    let stages = decompose_ratio(ratio);
    debug!(
        "Reconciling {:.2}s narration into {:.2}s video: ratio {:.4}, stages {:?}, subtitle scale {:.4}",
        measured_secs, target_secs, ratio, stages, subtitle_scale
    );

    DurationPlan { stages, subtitle_scale }
}

/// Decompose a tempo ratio into stages bounded to [0.5, 2.0].
///
/// Ratios above 2.0 emit full 2.0 stages until the remainder fits, with one
/// final stage for the remainder when it still exceeds 1.0; the rule for
/// ratios below 0.5 is symmetric. Each stage is rounded to two decimals for
/// transform-parameter compatibility; the small cumulative duration error
/// this introduces is accepted, not corrected.
pub fn decompose_ratio(ratio: f64) -> Vec<f64> {
    let mut stages = Vec::new();

    if !ratio.is_finite() || ratio <= 0.0 {
        warn!("Cannot decompose non-positive tempo ratio {}", ratio);
        return stages;
    }

    let mut remaining = ratio;

    if remaining > TEMPO_STAGE_MAX {
        while remaining > TEMPO_STAGE_MAX {
            stages.push(TEMPO_STAGE_MAX);
            remaining /= TEMPO_STAGE_MAX;
        }
        if remaining > 1.0 {
            stages.push(round_stage(remaining));
        }
    } else if remaining < TEMPO_STAGE_MIN {
        while remaining < TEMPO_STAGE_MIN {
            stages.push(TEMPO_STAGE_MIN);
            remaining /= TEMPO_STAGE_MIN;
        }
        if remaining < 1.0 {
            stages.push(round_stage(remaining));
        }
    } else {
        stages.push(round_stage(remaining));
    }

    stages
}

fn round_stage(factor: f64) -> f64 {
    (factor * 100.0).round() / 100.0
}
