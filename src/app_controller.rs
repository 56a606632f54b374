use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::assets;
use crate::dcst;
use crate::file_utils::FileManager;
use crate::synthesis::{Profile, RunContext, SynthesisRequest, SynthesizedReel, Synthesizer};
use crate::track_file::{EncryptionKey, TrackFileJob, TrackFileWrapper};

// @module: Application controller for reel synthesis

/// Everything requested for one run, after command-line overrides
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    // @field: Text or image payload
    pub profile: Profile,
    // @field: Write an MXF track file
    pub track_file: bool,
    // @field: Encrypt the track file
    pub encrypt: bool,
    pub duration: u32,
    pub frame_rate: String,
    pub display_index: u32,
    pub reel_number: u32,
    pub language: String,
    pub title: String,
    pub namespace: String,
    // @field: Existing document to take global properties from
    pub template: Option<PathBuf>,
    // @field: Output directory, the document goes to stdout when unset
    pub output: Option<PathBuf>,
}

impl RunOptions {
    /// Options seeded from the configured document defaults
    pub fn from_config(config: &Config) -> Self {
        let document = &config.document;
        Self {
            profile: Profile::Text,
            track_file: false,
            encrypt: false,
            duration: document.duration,
            frame_rate: document.frame_rate.clone(),
            display_index: document.display_index,
            reel_number: document.reel_number,
            language: document.language.clone(),
            title: document.title.clone(),
            namespace: document.namespace.clone(),
            template: None,
            output: None,
        }
    }

    fn synthesis_request(&self) -> SynthesisRequest {
        SynthesisRequest {
            profile: self.profile,
            display_index: self.display_index,
            reel_number: self.reel_number,
            frame_rate: self.frame_rate.clone(),
            language: self.language.clone(),
            title: self.title.clone(),
            namespace: self.namespace.clone(),
            template: self.template.clone(),
        }
    }
}

/// What a run produced
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Rendered document, header included
    pub rendered: String,
    pub profile: Profile,
    /// Written document, when an output directory was set and the write succeeded
    pub document_path: Option<PathBuf>,
    /// Track file created by the wrapper
    pub track_file: Option<PathBuf>,
    /// Key material handed to the wrapper for an encrypted track file
    pub encryption_key: Option<EncryptionKey>,
}

/// Main application controller
///
/// Synthesis and rendering failures abort the run. Failures while writing the
/// document or its companion assets are logged and the run continues. A missing
/// wrapper is only a warning, but a wrapper that fails aborts the run.
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Identifiers and timestamp shared by the run
    context: RunContext,
    // @field: Track file wrapper
    wrapper: TrackFileWrapper,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Self::with_context(config, RunContext::generate())
    }

    /// Controller with fixed run identifiers
    pub fn with_context(config: Config, context: RunContext) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        let wrapper = TrackFileWrapper::new(&config.track_file.binary, config.track_file.timeout());

        Ok(Self {
            config,
            context,
            wrapper,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn context(&self) -> &RunContext {
        &self.context
    }

    /// Synthesize, render and write out one reel
    pub async fn run(&self, options: &RunOptions) -> Result<RunOutcome> {
        let synthesized = Synthesizer::new(&self.context).synthesize(&options.synthesis_request())?;
        let rendered = dcst::render(&synthesized.reel)?;

        let mut outcome = RunOutcome {
            rendered,
            profile: synthesized.profile,
            document_path: None,
            track_file: None,
            encryption_key: None,
        };

        let output_dir = match &options.output {
            Some(dir) => dir,
            None => {
                println!("{}", outcome.rendered);
                if options.track_file {
                    warn!("Track file creation requires an output directory, skipping");
                }
                return Ok(outcome);
            }
        };

        outcome.document_path = self.write_outputs(&synthesized, &outcome.rendered, output_dir);

        if options.track_file {
            let Some(document_path) = outcome.document_path.clone() else {
                warn!("Document was not written, skipping track file creation");
                return Ok(outcome);
            };

            if !self.wrapper.is_available() {
                warn!(
                    "{} not installed or not available at $PATH",
                    self.wrapper.binary().display()
                );
                return Ok(outcome);
            }

            let key = options.encrypt.then(EncryptionKey::generate);
            if let Some(key) = &key {
                println!(
                    "\nKeep the following safe!\nKeyID: {}\nKeyString: {}",
                    key.key_id, key.key
                );
            }

            let job = TrackFileJob {
                track_id: self.context.track_id,
                key: key.clone(),
                duration: options.duration,
                frame_rate: synthesized.frame_rate.clone(),
                reel_number: synthesized.reel.reel_number,
                document_path,
                output_dir: output_dir.clone(),
            };

            outcome.track_file = Some(self.wrapper.wrap(&job).await?);
            outcome.encryption_key = key;
        }

        Ok(outcome)
    }

    // Filesystem failures are logged and swallowed here
    fn write_outputs(&self, synthesized: &SynthesizedReel, rendered: &str, output_dir: &Path) -> Option<PathBuf> {
        if let Err(e) = FileManager::ensure_dir(output_dir) {
            error!("{:#}", e);
        }

        let document_path = output_dir.join(&synthesized.filename);
        let written = match FileManager::write_to_file(&document_path, rendered) {
            Ok(()) => {
                info!("Document written: {:?}", document_path);
                Some(document_path)
            }
            Err(e) => {
                error!("{:#}", e);
                None
            }
        };

        match synthesized.profile {
            Profile::Text => {
                let font = match &self.config.font_resource {
                    Some(path) => Ok(path.clone()),
                    None => assets::default_font_path(),
                };
                match font.and_then(|font| assets::copy_font(&font, output_dir)) {
                    Ok(target) => debug!("Font resource copied to {:?}", target),
                    Err(e) => error!("{:#}", e),
                }
            }
            Profile::Image => {
                if let Some(image_id) = &synthesized.placeholder_image {
                    match assets::write_placeholder_png(output_dir, image_id) {
                        Ok(path) => debug!("Placeholder image written: {:?}", path),
                        Err(e) => error!("{:#}", e),
                    }
                }
            }
        }

        written
    }
}
