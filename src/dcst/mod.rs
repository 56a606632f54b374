/*!
 * SMPTE ST 428-7 D-Cinema subtitle documents.
 *
 * - `model`: the subtitle reel entity graph
 * - `render`: canonical XML encoding of a reel
 * - `template`: loading global properties from an existing document
 */

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};

pub mod model;
pub mod render;
pub mod template;

pub use model::{Font, Image, LoadFont, Subtitle, SubtitleList, SubtitleReel, Text};
pub use render::{render, XML_HEADER};
pub use template::{parse_template, TemplateOverrides};

/// 2010 revision of the DCST schema
pub const DCST_2010_NAMESPACE: &str = "http://www.smpte-ra.org/schemas/428-7/2010/DCST";

/// 2014 revision of the DCST schema, used for new documents
pub const DCST_2014_NAMESPACE: &str = "http://www.smpte-ra.org/schemas/428-7/2014/DCST";

/// Superseded 2007 revision, explicitly refused as a template
pub const DCST_2007_NAMESPACE: &str = "http://www.smpte-ra.org/schemas/428-7/2007/DCST";

/// Identifier of the embedded font shipped with text-profile reels
pub const FONT_ID: &str = "232c45d8-fde8-4e5e-86b9-86e96354daf3";

/// LoadFont ID attribute used by text-profile reels
pub const LOAD_FONT_NAME: &str = "Arial";

/// Schema revisions that are accepted as current
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaRevision {
    Dcst2010,
    Dcst2014,
}

impl SchemaRevision {
    /// Look up an accepted namespace URI
    pub fn from_namespace(namespace: &str) -> Option<Self> {
        match namespace {
            DCST_2010_NAMESPACE => Some(Self::Dcst2010),
            DCST_2014_NAMESPACE => Some(Self::Dcst2014),
            _ => None,
        }
    }

    /// Internal tag of the revision
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Dcst2010 => "dcst2010",
            Self::Dcst2014 => "dcst2014",
        }
    }

    /// Namespace URI of the revision
    pub fn namespace(&self) -> &'static str {
        match self {
            Self::Dcst2010 => DCST_2010_NAMESPACE,
            Self::Dcst2014 => DCST_2014_NAMESPACE,
        }
    }
}

/// Whether a reel is presented as open subtitles or closed captions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayType {
    #[default]
    MainSubtitle,
    ClosedCaption,
}

impl DisplayType {
    /// Map a display index: 0 is MainSubtitle, every other value ClosedCaption
    pub fn from_index(index: u32) -> Self {
        if index == 0 {
            Self::MainSubtitle
        } else {
            Self::ClosedCaption
        }
    }

    /// Canonical display index of the type
    pub fn index(&self) -> u32 {
        match self {
            Self::MainSubtitle => 0,
            Self::ClosedCaption => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MainSubtitle => "MainSubtitle",
            Self::ClosedCaption => "ClosedCaption",
        }
    }
}

impl fmt::Display for DisplayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DisplayType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "MainSubtitle" => Ok(Self::MainSubtitle),
            "ClosedCaption" => Ok(Self::ClosedCaption),
            _ => Err(anyhow!("Invalid display type: {}", s)),
        }
    }
}
