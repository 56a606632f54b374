// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use emptydcst::app_config::{self, Config};
use emptydcst::app_controller::{Controller, RunOptions};
use emptydcst::synthesis::Profile;

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
    /// Generate shell completions for emptydcst
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// emptydcst - minimal SMPTE ST 428-7 subtitle reels
///
/// Writes an empty D-Cinema subtitle document with a single placeholder event,
/// optionally wrapped into an MXF track file with asdcp-wrap.
#[derive(Parser, Debug)]
#[command(name = "emptydcst")]
#[command(version)]
#[command(about = "Minimal SMPTE ST 428-7 subtitle reel generator")]
#[command(long_about = "emptydcst writes a minimal SMPTE ST 428-7 (DCST) subtitle reel and can hand it to asdcp-wrap to produce an MXF track file.

EXAMPLES:
    emptydcst                                  # Text profile reel to stdout
    emptydcst -o out/                          # Write reel and font to out/
    emptydcst --image -m 1 -o out/             # Closed caption image reel with PNG placeholder
    emptydcst -x reel.xml -o out/              # Reuse global properties of an existing reel
    emptydcst -T -e -d 48 -p 25 -o out/        # Encrypted 48 frame track file at 25 fps
    emptydcst completions bash > emptydcst.bash

CONFIGURATION:
    Defaults are read from emptydcst.json when it exists. A file named with
    --config is created with the defaults when missing. Flags override the file.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Use the text profile
    #[arg(long)]
    text: bool,

    /// Use the image profile (wins over --text)
    #[arg(long)]
    image: bool,

    /// Write an MXF track file, requires --output
    #[arg(short = 'T', long = "track")]
    track_file: bool,

    /// Encrypt the track file
    #[arg(short, long)]
    encrypt: bool,

    /// Track file duration in frames
    #[arg(short, long)]
    duration: Option<u32>,

    /// Frame rate
    #[arg(short = 'p', long = "frame-rate")]
    frame_rate: Option<String>,

    /// DisplayType: 0 = MainSubtitle, 1 = ClosedCaption
    #[arg(short = 'm', long = "display")]
    display_index: Option<u32>,

    /// ReelNumber
    #[arg(short, long = "reel")]
    reel_number: Option<u32>,

    /// RFC 5646 language tag
    #[arg(short, long = "lang")]
    language: Option<String>,

    /// ContentTitleText
    #[arg(short, long)]
    title: Option<String>,

    /// ST 428-7 document to use as template
    #[arg(short = 'x', long)]
    template: Option<PathBuf>,

    /// Output directory, stdout when not set
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file path, created with defaults when missing
    #[arg(short, long = "config")]
    config_path: Option<PathBuf>,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Unexpected trailing arguments
    #[arg(hide = true)]
    stray: Vec<String>,
}

impl CommandLineOptions {
    fn run_options(&self, config: &Config) -> RunOptions {
        let mut options = RunOptions::from_config(config);
        options.profile = Profile::resolve(self.text, self.image);
        options.track_file = self.track_file;
        options.encrypt = self.encrypt;
        if let Some(duration) = self.duration {
            options.duration = duration;
        }
        if let Some(frame_rate) = &self.frame_rate {
            options.frame_rate = frame_rate.clone();
        }
        if let Some(display_index) = self.display_index {
            options.display_index = display_index;
        }
        if let Some(reel_number) = self.reel_number {
            options.reel_number = reel_number;
        }
        if let Some(language) = &self.language {
            options.language = language.clone();
        }
        if let Some(title) = &self.title {
            options.title = title.clone();
        }
        options.template = self.template.clone();
        options.output = self.output.clone();
        options
    }

    // Flags that the config validates; language and title only reach the run
    fn apply_to_config(&self, config: &mut Config) {
        let document = &mut config.document;
        if let Some(frame_rate) = &self.frame_rate {
            document.frame_rate = frame_rate.clone();
        }
        if let Some(reel_number) = self.reel_number {
            document.reel_number = reel_number;
        }
        if let Some(log_level) = &self.log_level {
            config.log_level = log_level.clone().into();
        }
    }
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
        // The logger accepts everything, filtering happens through max_level
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji and ANSI colour for log level
    fn decoration(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
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
            let (emoji, colour) = Self::decoration(record.level());

            // stdout carries the document and key material, logs go to stderr
            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", colour, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = CustomLogger::init(LevelFilter::Info) {
        eprintln!("{}", e);
    }

    let cli = CommandLineOptions::parse();

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: CommandLineOptions) -> Result<()> {
    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "emptydcst", &mut std::io::stdout());
        return Ok(());
    }

    if !cli.stray.is_empty() {
        return Err(anyhow!("check command expression: unexpected {:?}", cli.stray));
    }

    // A log level from the command line applies before the config is read
    if let Some(cmd_log_level) = &cli.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = match &cli.config_path {
        Some(path) => Config::load(path, true)?,
        None => Config::load(app_config::DEFAULT_CONFIG_FILE, false)?,
    };
    cli.apply_to_config(&mut config);
    log::set_max_level(config.log_level.to_level_filter());

    let options = cli.run_options(&config);
    let controller = Controller::with_config(config)?;
    controller.run(&options).await?;

    Ok(())
}
