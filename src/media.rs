use std::io::Write;
use std::path::{Path, PathBuf};
use log::{error, warn, debug};
use tempfile::NamedTempFile;
use tokio::process::Command;

use crate::errors::MediaError;
use crate::reconcile::DurationPlan;

// @module: External media tool collaborators (ffmpeg/ffprobe)

// @const: Timeout for availability probes, seconds
const VERSION_CHECK_TIMEOUT_SECS: u64 = 5;

// @const: Timeout for duration probes, seconds
const PROBE_TIMEOUT_SECS: u64 = 10;

// @const: Timeout for audio transforms, seconds
const TRANSFORM_TIMEOUT_SECS: u64 = 60;

// @const: Timeout for the final mux, seconds
const MUX_TIMEOUT_SECS: u64 = 120;

/// Burned-in subtitle style passed to the subtitles filter
const SUBTITLE_STYLE: &str = "FontName=Arial,FontSize=24,PrimaryColour=&Hffffff,OutlineColour=&H000000";

/// Run an external tool with a bounded timeout
async fn run_tool(program: &str, args: &[String], timeout_secs: u64) -> Result<std::process::Output, MediaError> {
    let tool_future = Command::new(program)
        .args(args)
        .output();

    let timeout_duration = std::time::Duration::from_secs(timeout_secs);
    let output = tokio::select! {
        result = tool_future => {
            result.map_err(|e| MediaError::ToolMissing(format!("{}: {}", program, e)))?
        },
        _ = tokio::time::sleep(timeout_duration) => {
            return Err(MediaError::Timeout(format!("{} did not finish within {}s", program, timeout_secs)));
        }
    };

    Ok(output)
}

/// Check that an external tool responds to `-version`
pub async fn check_tool(program: &str) -> bool {
    match run_tool(program, &["-version".to_string()], VERSION_CHECK_TIMEOUT_SECS).await {
        Ok(output) => output.status.success(),
        Err(_) => false,
    }
}

/// Probe a media file's duration in seconds.
///
/// Works for both audio and video files. A failed or unparsable probe is
/// reported and yields `None`; callers fall back to identity factors.
pub async fn probe_duration<P: AsRef<Path>>(media: P) -> Option<f64> {
    let media = media.as_ref();

    if !media.exists() {
        warn!("Cannot probe duration, file does not exist: {:?}", media);
        return None;
    }

    let args = vec![
        "-v".to_string(), "error".to_string(),
        "-show_entries".to_string(), "format=duration".to_string(),
        "-of".to_string(), "default=noprint_wrappers=1:nokey=1".to_string(),
        media.to_string_lossy().to_string(),
    ];

    let output = match run_tool("ffprobe", &args, PROBE_TIMEOUT_SECS).await {
        Ok(output) => output,
        Err(e) => {
            warn!("Duration probe failed for {:?}: {}", media, e);
            return None;
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        warn!("ffprobe failed for {:?}: {}", media, filter_ffmpeg_stderr(&stderr));
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    match stdout.trim().parse::<f64>() {
        Ok(seconds) if seconds.is_finite() && seconds > 0.0 => Some(seconds),
        Ok(seconds) => {
            warn!("ffprobe reported a non-positive duration ({}) for {:?}", seconds, media);
            None
        }
        Err(e) => {
            warn!("Could not parse ffprobe duration output '{}': {}", stdout.trim(), e);
            None
        }
    }
}

/// Apply a duration plan's tempo stages to an audio file.
///
/// Composing the stages in order reproduces the originally computed ratio
/// within the per-stage rounding. A passthrough plan copies the input
/// unchanged.
pub async fn apply_tempo<P1: AsRef<Path>, P2: AsRef<Path>>(
    input: P1,
    plan: &DurationPlan,
    output: P2,
) -> Result<(), MediaError> {
    let input = input.as_ref();
    let output = output.as_ref();

    if plan.is_passthrough() {
        debug!("Tempo plan is a passthrough, copying {:?} unchanged", input);
        std::fs::copy(input, output)?;
        return Ok(());
    }

    let filter = plan.stages.iter()
        .map(|stage| format!("atempo={:.2}", stage))
        .collect::<Vec<_>>()
        .join(",");

    let args = vec![
        "-i".to_string(), input.to_string_lossy().to_string(),
        "-filter:a".to_string(), filter.clone(),
        "-y".to_string(),
        output.to_string_lossy().to_string(),
    ];

    let result = run_tool("ffmpeg", &args, TRANSFORM_TIMEOUT_SECS).await?;

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        let filtered = filter_ffmpeg_stderr(&stderr);
        error!("Tempo transform failed ({}): {}", filter, filtered);
        return Err(MediaError::TransformFailed(filtered));
    }

    debug!("Applied tempo chain {} to {:?}", filter, input);
    Ok(())
}

/// Concatenate audio clips in the given order into a single track.
///
/// Order-preserving, no gaps inserted beyond what each clip already
/// contains. The concat list lives in a scoped temporary file that is
/// removed on every exit path.
pub async fn concat_clips(clips: &[PathBuf], output: &Path) -> Result<(), MediaError> {
    if clips.is_empty() {
        return Err(MediaError::ConcatFailed("no audio clips to concatenate".to_string()));
    }

    let mut list_file = NamedTempFile::new()?;
    for clip in clips {
        // The concat demuxer expects forward slashes even on Windows
        let clip_path = clip.to_string_lossy().replace('\\', "/");
        writeln!(list_file, "file '{}'", clip_path)?;
    }
    list_file.flush()?;

    let args = vec![
        "-f".to_string(), "concat".to_string(),
        "-safe".to_string(), "0".to_string(),
        "-i".to_string(), list_file.path().to_string_lossy().to_string(),
        "-c".to_string(), "copy".to_string(),
        "-y".to_string(),
        output.to_string_lossy().to_string(),
    ];

    let result = run_tool("ffmpeg", &args, TRANSFORM_TIMEOUT_SECS).await?;

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        let filtered = filter_ffmpeg_stderr(&stderr);
        error!("Concatenation of {} clips failed: {}", clips.len(), filtered);
        return Err(MediaError::ConcatFailed(filtered));
    }

    debug!("Concatenated {} clips into {:?}", clips.len(), output);
    Ok(())
}

/// Combine video, audio and optional burned-in subtitles into the output
/// file. The shorter of the two streams truncates the result.
pub async fn mux(
    video: &Path,
    audio: &Path,
    subtitles: Option<&Path>,
    output: &Path,
) -> Result<(), MediaError> {
    if !video.exists() {
        return Err(MediaError::MuxFailed(format!("video file not found: {:?}", video)));
    }
    if !audio.exists() {
        return Err(MediaError::MuxFailed(format!("audio file not found: {:?}", audio)));
    }

    let mut args = vec![
        "-i".to_string(), video.to_string_lossy().to_string(),
        "-i".to_string(), audio.to_string_lossy().to_string(),
    ];

    if let Some(subtitle_path) = subtitles.filter(|p| p.exists()) {
        // The subtitles filter needs colons in the path escaped
        let escaped = subtitle_path.to_string_lossy()
            .replace('\\', "/")
            .replace(':', "\\:");
        args.push("-vf".to_string());
        args.push(format!("subtitles='{}':force_style='{}'", escaped, SUBTITLE_STYLE));
    }

    args.extend([
        "-c:v".to_string(), "libx264".to_string(),
        "-c:a".to_string(), "aac".to_string(),
        "-map".to_string(), "0:v:0".to_string(),
        "-map".to_string(), "1:a:0".to_string(),
        "-shortest".to_string(),
        "-y".to_string(),
        output.to_string_lossy().to_string(),
    ]);

    let result = run_tool("ffmpeg", &args, MUX_TIMEOUT_SECS).await?;

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        let filtered = filter_ffmpeg_stderr(&stderr);
        error!("Mux failed: {}", filtered);
        return Err(MediaError::MuxFailed(filtered));
    }

    Ok(())
}

/// Filter ffmpeg stderr to only show meaningful error lines, stripping the
/// version banner, build configuration, and stream metadata noise.
pub fn filter_ffmpeg_stderr(stderr: &str) -> String {
    let dominated_prefixes = [
        "ffmpeg version",
        "ffprobe version",
        "  built with",
        "  configuration:",
        "  lib",
        "Input #",
        "  Metadata:",
        "  Duration:",
        "  Stream #",
        "      Metadata:",
        "Output #",
        "Stream mapping:",
        "Press [q]",
    ];

    let meaningful: Vec<&str> = stderr
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return false;
            }
            !dominated_prefixes.iter().any(|p| line.starts_with(p))
        })
        .collect();

    if meaningful.is_empty() {
        "unknown ffmpeg error (stderr was empty after filtering)".to_string()
    } else {
        meaningful.join("\n")
    }
}
