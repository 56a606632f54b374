use anyhow::{anyhow, Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::dcst::{SchemaRevision, DCST_2014_NAMESPACE};
use crate::timecode::parse_frame_rate;
use crate::track_file::WRAPPER_BINARY;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "emptydcst.json";

/// Application configuration module
/// This module handles loading, validating and saving the defaults used when
/// synthesizing a reel. Command-line values take precedence over these.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Document defaults
    #[serde(default)]
    pub document: DocumentConfig,

    /// Track file wrapper settings
    #[serde(default)]
    pub track_file: TrackFileConfig,

    /// Explicit path of the embedded font resource
    #[serde(default)]
    pub font_resource: Option<PathBuf>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Default global properties of a synthesized reel
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DocumentConfig {
    // @field: RFC 5646 language tag
    #[serde(default = "default_language")]
    pub language: String,

    // @field: ContentTitleText
    #[serde(default = "default_title")]
    pub title: String,

    // @field: Frame rate as written in EditRate
    #[serde(default = "default_frame_rate")]
    pub frame_rate: String,

    // @field: ReelNumber
    #[serde(default = "default_reel_number")]
    pub reel_number: u32,

    // @field: 0 = MainSubtitle, anything else ClosedCaption
    #[serde(default)]
    pub display_index: u32,

    // @field: Track file duration in frames
    #[serde(default = "default_duration")]
    pub duration: u32,

    // @field: Schema namespace of new documents
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            title: default_title(),
            frame_rate: default_frame_rate(),
            reel_number: default_reel_number(),
            display_index: 0,
            duration: default_duration(),
            namespace: default_namespace(),
        }
    }
}

/// External wrapper configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TrackFileConfig {
    // @field: Wrapper executable name or path
    #[serde(default = "default_wrapper_binary")]
    pub binary: String,

    // @field: Timeout seconds, none waits for the wrapper indefinitely
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for TrackFileConfig {
    fn default() -> Self {
        Self {
            binary: default_wrapper_binary(),
            timeout_secs: None,
        }
    }
}

impl TrackFileConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}

fn default_title() -> String {
    "No Title".to_string()
}

fn default_frame_rate() -> String {
    "24".to_string()
}

fn default_reel_number() -> u32 {
    1
}

fn default_duration() -> u32 {
    24
}

fn default_namespace() -> String {
    DCST_2014_NAMESPACE.to_string()
}

fn default_wrapper_binary() -> String {
    WRAPPER_BINARY.to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let document = &self.document;

        if document.language.trim().is_empty() {
            return Err(anyhow!("Document language must not be empty"));
        }

        if document.reel_number == 0 {
            return Err(anyhow!("Reel number must be at least 1"));
        }

        parse_frame_rate(&document.frame_rate)
            .with_context(|| format!("Invalid frame rate: {:?}", document.frame_rate))?;

        if SchemaRevision::from_namespace(&document.namespace).is_none() {
            return Err(anyhow!("Unsupported document namespace: {}", document.namespace));
        }

        if self.track_file.binary.trim().is_empty() {
            return Err(anyhow!("Track file wrapper binary must not be empty"));
        }

        if self.track_file.timeout_secs == Some(0) {
            return Err(anyhow!("Track file timeout must be greater than 0 seconds"));
        }

        Ok(())
    }

    /// Load the configuration at `path`, falling back to the defaults when it is missing
    ///
    /// With `create_missing` the defaults are also written to `path`. A failed
    /// write is logged and the defaults are still returned.
    pub fn load<P: AsRef<Path>>(path: P, create_missing: bool) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {:?}", path))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            return Ok(config);
        }

        let config = Config::default();
        if !create_missing {
            debug!("No config file at {:?}, using defaults", path);
            return Ok(config);
        }

        warn!("Config file not found at {:?}, creating default config.", path);
        if let Err(e) = config.save(path) {
            warn!("{:#}", e);
        }

        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {:?}", path))?;
        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            document: DocumentConfig::default(),
            track_file: TrackFileConfig::default(),
            font_resource: None,
            log_level: LogLevel::default(),
        }
    }
}
