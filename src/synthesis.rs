/*!
 * Subtitle reel synthesis.
 *
 * Builds the minimal reel: defaults from the caller, overrides from an optional
 * template, one demonstrative subtitle event in either the text or the image
 * profile, and the derived document file name.
 */

use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};
use log::{debug, warn};
use uuid::Uuid;

use crate::dcst::model::{Font, Image, LoadFont, Subtitle, SubtitleList, SubtitleReel, Text};
use crate::dcst::{DisplayType, TemplateOverrides};
use crate::errors::TimecodeError;
use crate::language_utils;
use crate::timecode::{parse_frame_rate, Timecode};

/// Offset appended to every issue date. It is a literal, not the local offset.
pub const ISSUE_DATE_OFFSET: &str = "-00:00";

// Demonstrative event bounds, in seconds
const TIME_IN_SECONDS: u64 = 4;
const TIME_OUT_SECONDS: u64 = 19;

/// Identifiers and timestamp shared by everything produced in one run
#[derive(Debug, Clone, PartialEq)]
pub struct RunContext {
    /// Document UUID, also used for the XML file name
    pub document_id: Uuid,
    /// Track file UUID handed to the wrapper
    pub track_id: Uuid,
    /// Local wall-clock time the run started
    pub issued_at: NaiveDateTime,
}

impl RunContext {
    /// Fresh identifiers and the current local time
    pub fn generate() -> Self {
        Self {
            document_id: Uuid::new_v4(),
            track_id: Uuid::new_v4(),
            issued_at: Local::now().naive_local(),
        }
    }

    pub fn new(document_id: Uuid, track_id: Uuid, issued_at: NaiveDateTime) -> Self {
        Self {
            document_id,
            track_id,
            issued_at,
        }
    }

    /// `urn:uuid:` form of the document identifier
    pub fn document_urn(&self) -> String {
        format!("urn:uuid:{}", self.document_id)
    }

    /// Issue date truncated to whole seconds with the literal offset suffix
    pub fn issue_date(&self) -> String {
        format!("{}{}", self.issued_at.format("%Y-%m-%dT%H:%M:%S"), ISSUE_DATE_OFFSET)
    }

    /// `<document uuid>_r<reel>.xml`
    pub fn document_filename(&self, reel_number: u32) -> String {
        format!("{}_r{}.xml", self.document_id, reel_number)
    }
}

/// Payload kind of the synthesized event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    #[default]
    Text,
    Image,
}

impl Profile {
    /// Resolve the requested profile flags, image takes precedence
    pub fn resolve(text: bool, image: bool) -> Self {
        match (text, image) {
            (true, true) => {
                debug!("Both text and image profiles requested, using image");
                Self::Image
            }
            (_, true) => Self::Image,
            _ => Self::Text,
        }
    }
}

/// Everything the caller decides about the reel
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    pub profile: Profile,
    pub display_index: u32,
    pub reel_number: u32,
    pub frame_rate: String,
    pub language: String,
    pub title: String,
    pub namespace: String,
    pub template: Option<PathBuf>,
}

impl SynthesisRequest {
    /// Overwrite the global properties with a template's values
    pub fn apply_template(&mut self, overrides: &TemplateOverrides) {
        self.namespace = overrides.namespace.clone();
        self.title = overrides.title.clone();
        self.language = overrides.language.clone();
        if let Some(frame_rate) = &overrides.frame_rate {
            self.frame_rate = frame_rate.clone();
        }
        if let Some(display_index) = overrides.display_index {
            self.display_index = display_index;
        }
    }
}

/// A populated reel and what the caller needs to write it out
#[derive(Debug, Clone)]
pub struct SynthesizedReel {
    pub reel: SubtitleReel,
    /// Document file name
    pub filename: String,
    pub profile: Profile,
    /// Frame rate after template overrides
    pub frame_rate: String,
    /// Raster asset to produce, image profile only
    pub placeholder_image: Option<Uuid>,
}

/// Builds reels for one run context
pub struct Synthesizer<'a> {
    context: &'a RunContext,
}

impl<'a> Synthesizer<'a> {
    pub fn new(context: &'a RunContext) -> Self {
        Self { context }
    }

    /// Synthesize a reel. A template that cannot be used is reported and ignored.
    pub fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesizedReel, TimecodeError> {
        let mut working = request.clone();

        if let Some(template) = &request.template {
            match TemplateOverrides::load(template) {
                Ok(overrides) => {
                    debug!("Using template {:?}", template);
                    working.apply_template(&overrides);
                }
                Err(e) => {
                    warn!("{}; unable to use template, running with default values", e);
                }
            }
        }

        if let Err(e) = language_utils::validate_language_tag(&working.language) {
            warn!("{}", e);
        }

        let frame_rate = parse_frame_rate(&working.frame_rate)?;
        let mut stamp = Timecode::new(frame_rate)?;
        let start_time = stamp.timecode();
        stamp.set_frames(TIME_IN_SECONDS * stamp.effective_rate());
        let time_in = stamp.timecode();
        stamp.set_frames(TIME_OUT_SECONDS * stamp.effective_rate());
        let time_out = stamp.timecode();

        let mut reel = SubtitleReel {
            namespace: working.namespace.clone(),
            id: self.context.document_urn(),
            content_title_text: working.title.clone(),
            issue_date: self.context.issue_date(),
            reel_number: working.reel_number,
            language: working.language.clone(),
            edit_rate: format!("{} 1", working.frame_rate),
            time_code_rate: working.frame_rate.clone(),
            start_time,
            display_type: DisplayType::from_index(working.display_index),
            load_font: None,
            subtitle_list: SubtitleList::default(),
        };

        let mut placeholder_image = None;
        let subtitle = match working.profile {
            Profile::Image => {
                let image_id = Uuid::new_v4();
                placeholder_image = Some(image_id);
                Subtitle::with_images(
                    time_in,
                    time_out,
                    vec![Image::new(format!("urn:uuid:{}", image_id))],
                )
            }
            Profile::Text => {
                reel.load_font = Some(LoadFont::default());
                Subtitle::with_text(time_in, time_out, vec![Text::placeholder()])
            }
        };

        reel.subtitle_list.fonts.push(Font {
            subtitles: vec![subtitle],
            ..Font::default()
        });

        debug!(
            "Synthesized {:?} reel {} ({}, {} fps)",
            working.profile, reel.reel_number, reel.display_type, working.frame_rate
        );

        Ok(SynthesizedReel {
            filename: self.context.document_filename(working.reel_number),
            reel,
            profile: working.profile,
            frame_rate: working.frame_rate,
            placeholder_image,
        })
    }
}
