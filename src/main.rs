// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::too_many_arguments)]

use anyhow::{Result, anyhow, Context};
use log::{warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use std::fs::File;
use std::io::BufReader;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::app_config::{Config, CueMode, TtsProvider};
use app_controller::Controller;

mod app_config;
mod app_controller;
mod errors;
mod file_utils;
mod media;
mod narration;
mod providers;
mod reconcile;
mod script;
mod subtitle_renderer;
mod timeline;

/// CLI Wrapper for TtsProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTtsProvider {
    ElevenLabs,
    OpenAI,
}

impl From<CliTtsProvider> for TtsProvider {
    fn from(cli_provider: CliTtsProvider) -> Self {
        match cli_provider {
            CliTtsProvider::ElevenLabs => TtsProvider::ElevenLabs,
            CliTtsProvider::OpenAI => TtsProvider::OpenAI,
        }
    }
}

/// CLI Wrapper for CueMode to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliCueMode {
    Pattern,
    Static,
}

impl From<CliCueMode> for CueMode {
    fn from(cli_mode: CliCueMode) -> Self {
        match cli_mode {
            CliCueMode::Pattern => CueMode::Pattern,
            CliCueMode::Static => CueMode::Static,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Narrate a test recording (default command)
    #[command(alias = "narrate")]
    Narrate(NarrateArgs),

    /// Generate shell completions for narravid
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct NarrateArgs {
    /// Test script to narrate
    #[arg(value_name = "SCRIPT_PATH")]
    script_path: PathBuf,

    /// Screen recording file, or a directory holding several takes
    /// (the newest .mp4 wins)
    #[arg(short, long, default_value = "test_videos")]
    video: PathBuf,

    /// Directory for the narrated video and the subtitle file
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Speech provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTtsProvider>,

    /// Voice identifier to narrate with
    #[arg(long)]
    voice: Option<String>,

    /// Model name to use for synthesis
    #[arg(short, long)]
    model: Option<String>,

    /// How narration cues are produced from the script
    #[arg(short = 'u', long, value_enum)]
    cue_source: Option<CliCueMode>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// narravid - Narrated Test Videos
///
/// Turns automated UI test scripts into narrated, subtitled videos by
/// combining a screen recording with synthesized speech and SRT subtitles.
#[derive(Parser, Debug)]
#[command(name = "narravid")]
#[command(version = "0.1.0")]
#[command(about = "Narrated test video generator")]
#[command(long_about = "narravid extracts narration cues from a test script, synthesizes speech for
each cue, and combines everything with the test's screen recording into one
subtitled video.

EXAMPLES:
    narravid hospital.cy.js                          # Narrate using default config
    narravid -f hospital.cy.js                       # Force overwrite existing files
    narravid -p openai -m gpt-4o-mini-tts login.cy.js  # Use specific provider and model
    narravid -v captures/run42.mp4 login.cy.js       # Use an explicit recording
    narravid -u static login.cy.js                   # Narrate the built-in step list
    narravid --log-level debug hospital.cy.js        # Narrate with debug logging
    narravid completions bash > narravid.bash        # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.

SUPPORTED PROVIDERS:
    elevenlabs - ElevenLabs TTS API (requires API key)
    openai     - OpenAI speech endpoint (requires API key)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Test script to narrate
    #[arg(value_name = "SCRIPT_PATH")]
    script_path: Option<PathBuf>,

    /// Screen recording file, or a directory holding several takes
    #[arg(short, long, default_value = "test_videos")]
    video: PathBuf,

    /// Directory for the narrated video and the subtitle file
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Speech provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTtsProvider>,

    /// Voice identifier to narrate with
    #[arg(long)]
    voice: Option<String>,

    /// Model name to use for synthesis
    #[arg(short, long)]
    model: Option<String>,

    /// How narration cues are produced from the script
    #[arg(short = 'u', long, value_enum)]
    cue_source: Option<CliCueMode>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let emoji = Self::get_emoji_for_level(record.level());

            let color = match record.level() {
                Level::Error => "\x1B[1;31m",
                Level::Warn => "\x1B[1;33m",
                Level::Info => "\x1B[1;32m",
                Level::Debug => "\x1B[1;36m",
                Level::Trace => "\x1B[1;35m",
            };

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                color, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "narravid", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Narrate(args)) => {
            run_narrate(args).await
        }
        None => {
            // Default behavior - use top-level args so the subcommand can be omitted
            let script_path = cli.script_path.ok_or_else(|| {
                anyhow!("SCRIPT_PATH is required when no subcommand is specified")
            })?;

            let narrate_args = NarrateArgs {
                script_path,
                video: cli.video,
                output_dir: cli.output_dir,
                force_overwrite: cli.force_overwrite,
                provider: cli.provider,
                voice: cli.voice,
                model: cli.model,
                cue_source: cli.cue_source,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_narrate(narrate_args).await
        }
    }
}

fn level_filter_for(config_level: &app_config::LogLevel) -> LevelFilter {
    match config_level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

async fn run_narrate(options: NarrateArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter_for(&config_log_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        // Override config with CLI options if provided
        if let Some(provider) = &options.provider {
            config.narration.provider = provider.clone().into();
        }

        if let Some(model) = &options.model {
            let provider_str = config.narration.provider.to_lowercase_string();
            if let Some(provider_config) = config.narration.available_providers.iter_mut()
                .find(|p| p.provider_type == provider_str) {
                provider_config.model = model.clone();
            }
        }

        if let Some(voice) = &options.voice {
            let provider_str = config.narration.provider.to_lowercase_string();
            if let Some(provider_config) = config.narration.available_providers.iter_mut()
                .find(|p| p.provider_type == provider_str) {
                provider_config.voice = voice.clone();
            }
        }

        if let Some(cue_source) = &options.cue_source {
            config.cue_source = cue_source.clone().into();
        }

        // Update log level in config if specified via command line
        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        config
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let mut config = Config::default();

        if let Some(provider) = &options.provider {
            config.narration.provider = provider.clone().into();
        }

        if let Some(cue_source) = &options.cue_source {
            config.cue_source = cue_source.clone().into();
        }

        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        // Save default config
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Validate the configuration after loading and overriding
    config.validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(level_filter_for(&config.log_level));
    }

    let controller = Controller::with_config(config)?;
    controller.run(
        options.script_path,
        options.video,
        options.output_dir,
        options.force_overwrite,
    ).await
}
