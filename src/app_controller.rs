use anyhow::{Result, anyhow};
use log::{warn, info};
use std::path::{Path, PathBuf};
use indicatif::{ProgressBar, ProgressStyle, MultiProgress};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::media;
use crate::narration::{NarrationAssembler, SpeechBackend};
use crate::reconcile;
use crate::script;
use crate::subtitle_renderer::SubtitleTrack;
use crate::timeline::Timeline;

// @module: Application controller for the narration pipeline

/// Main application controller for narrated test videos
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    /// Check if the controller is properly initialized with configuration
    pub fn is_initialized(&self) -> bool {
        !self.config.narration_language.is_empty()
            && !self.config.narration.get_voice().is_empty()
    }

    /// Run the main workflow: test script plus screen recording in, narrated
    /// and subtitled video out
    pub async fn run(&self, script_file: PathBuf, video_path: PathBuf, output_dir: PathBuf, force_overwrite: bool) -> Result<()> {
        let multi_progress = MultiProgress::new();
        self.run_with_progress(script_file, video_path, output_dir, &multi_progress, force_overwrite).await
    }

    /// Run the controller with progress reporting
    async fn run_with_progress(
        &self,
        script_file: PathBuf,
        video_path: PathBuf,
        output_dir: PathBuf,
        multi_progress: &MultiProgress,
        force_overwrite: bool,
    ) -> Result<()> {
        // Start timing the process
        let start_time = std::time::Instant::now();

        // Hard prerequisites: the external tools and the reference video.
        // Everything else degrades, these two abort the run.
        if !media::check_tool("ffmpeg").await {
            return Err(anyhow!("ffmpeg not found, install it and make sure it is on PATH"));
        }
        if !media::check_tool("ffprobe").await {
            return Err(anyhow!("ffprobe not found, install it and make sure it is on PATH"));
        }

        if !FileManager::file_exists(&script_file) {
            return Err(anyhow!("Test script does not exist: {:?}", script_file));
        }

        let video_file = self.resolve_recording(&video_path)?;
        info!("Using recording: {:?}", video_file);

        FileManager::ensure_dir(&output_dir)?;

        let output_path = output_dir.join(Self::output_filename(&video_file));
        if output_path.exists() && !force_overwrite {
            warn!("Skipping, output already exists (use -f to force overwrite): {:?}", output_path);
            return Ok(());
        }

        // Build the narration timeline from the test source
        let source = FileManager::read_to_string(&script_file)?;
        let timeline = script::extract_timeline(&source, &self.config.cue_source);
        info!("Extracted {} narration cues spanning {:.2}s", timeline.len(), timeline.total_span());

        // Probe the reference video; an unavailable duration keeps the
        // timeline unscaled instead of failing
        let target_duration = media::probe_duration(&video_file).await;
        match target_duration {
            Some(seconds) => info!("Recording duration: {:.2}s", seconds),
            None => warn!("Recording duration unavailable, subtitles and narration stay unscaled"),
        }

        // All intermediates live in a scoped temp dir, removed on every exit path
        let work_dir = tempfile::tempdir()?;

        let narration = self.synthesize_narration(&timeline, work_dir.path(), multi_progress).await?;

        let measured_duration = match &narration {
            Some(assembled) => {
                let measured = media::probe_duration(&assembled.track_path).await.unwrap_or(0.0);
                info!("Narration track: {} clips, {:.2}s", assembled.clip_count, measured);
                measured
            }
            None => 0.0,
        };

        let plan = reconcile::reconcile(
            measured_duration,
            target_duration.unwrap_or(0.0),
            timeline.total_span(),
        );

        // Subtitles are rescaled onto the video's own timeline, independent
        // of the narration stretch
        let srt_path = output_dir.join(self.subtitle_filename(&video_file));
        let subtitle_track = SubtitleTrack::from_timeline(&timeline, plan.subtitle_scale);
        subtitle_track.write_to_srt(&srt_path)?;
        info!("Wrote {} subtitle entries (scale x{:.2}): {:?}", subtitle_track.entries.len(), plan.subtitle_scale, srt_path);

        let final_audio = match &narration {
            Some(assembled) => {
                if plan.is_passthrough() {
                    assembled.track_path.clone()
                } else {
                    let scaled_track = work_dir.path().join("narration_scaled.mp3");
                    match media::apply_tempo(&assembled.track_path, &plan, &scaled_track).await {
                        Ok(()) => {
                            info!("Narration stretched with stages {:?}", plan.stages);
                            scaled_track
                        }
                        Err(e) => {
                            warn!("Tempo transform failed ({}), using the unstretched track", e);
                            assembled.track_path.clone()
                        }
                    }
                }
            }
            None => {
                // Subtitle-only degradation: keep the recording's own audio
                warn!("No narration available, producing a subtitle-only video");
                video_file.clone()
            }
        };

        media::mux(&video_file, &final_audio, Some(&srt_path), &output_path).await?;

        info!(
            "Done in {}: {:?} (subtitles: {:?})",
            Self::format_duration(start_time.elapsed()),
            output_path,
            srt_path
        );

        Ok(())
    }

    /// Synthesize the narration track with a per-cue progress bar
    async fn synthesize_narration(
        &self,
        timeline: &Timeline,
        work_dir: &Path,
        multi_progress: &MultiProgress,
    ) -> Result<Option<crate::narration::AssembledNarration>> {
        if timeline.is_empty() {
            warn!("Timeline is empty, skipping narration synthesis");
            return Ok(None);
        }

        let backend = SpeechBackend::from_config(&self.config.narration);
        let assembler = NarrationAssembler::new(
            backend,
            self.config.narration.optimal_concurrent_requests(),
        );

        let progress_bar = multi_progress.add(ProgressBar::new(timeline.len() as u64));
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} cues ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));

        info!("🎙 narravid: {} - {}",
            self.config.narration.provider.display_name(),
            self.config.narration.get_model());
        progress_bar.set_message("Synthesizing");

        let pb = progress_bar.clone();
        let track_path = work_dir.join("narration.mp3");
        let result = assembler.assemble(
            timeline,
            work_dir,
            &track_path,
            move |completed, _total| {
                pb.set_position(completed as u64);
            },
        ).await;

        progress_bar.finish_and_clear();
        result
    }

    /// Resolve the recording to narrate: an explicit file, or the newest
    /// capture inside a directory of takes
    fn resolve_recording(&self, video_path: &Path) -> Result<PathBuf> {
        if FileManager::file_exists(video_path) {
            return Ok(video_path.to_path_buf());
        }

        if FileManager::dir_exists(video_path) {
            return FileManager::find_newest_with_extension(video_path, "mp4")
                .ok_or_else(|| anyhow!("No .mp4 recording found in {:?}", video_path));
        }

        Err(anyhow!("Recording not found: {:?}", video_path))
    }

    /// Output filename for the narrated video
    fn output_filename(video_file: &Path) -> String {
        let stem = video_file.file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| String::from("output"));
        format!("{}.narrated.mp4", stem)
    }

    /// Subtitle filename, tagged with the narration language
    fn subtitle_filename(&self, video_file: &Path) -> String {
        let stem = video_file.file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| String::from("output"));
        format!("{}.{}.srt", stem, self.config.narration_language)
    }

    /// Format a duration for the final summary line
    fn format_duration(duration: std::time::Duration) -> String {
        let total_secs = duration.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:01}s", seconds, duration.subsec_millis() / 100)
        }
    }
}
