use super::{DisplayType, DCST_2014_NAMESPACE, FONT_ID, LOAD_FONT_NAME};

// @module: ST 428-7 subtitle reel entity graph

// @struct: Root of a subtitle document
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleReel {
    // @field: Schema namespace URI
    pub namespace: String,

    // @field: urn:uuid document identifier
    pub id: String,

    // @field: ContentTitleText
    pub content_title_text: String,

    // @field: Issue timestamp, already formatted
    pub issue_date: String,

    // @field: Reel number, starting at 1
    pub reel_number: u32,

    // @field: RFC 5646 language tag
    pub language: String,

    // @field: "<rate> 1"
    pub edit_rate: String,

    // @field: Whole frame rate as text
    pub time_code_rate: String,

    // @field: Always 00:00:00:00 for synthesized reels
    pub start_time: String,

    // @field: MainSubtitle or ClosedCaption
    pub display_type: DisplayType,

    // @field: Present only for text-profile reels
    pub load_font: Option<LoadFont>,

    // @field: Style blocks holding the events
    pub subtitle_list: SubtitleList,
}

impl Default for SubtitleReel {
    fn default() -> Self {
        Self {
            namespace: DCST_2014_NAMESPACE.to_string(),
            id: String::new(),
            content_title_text: String::new(),
            issue_date: String::new(),
            reel_number: 1,
            language: String::new(),
            edit_rate: String::new(),
            time_code_rate: String::new(),
            start_time: String::new(),
            display_type: DisplayType::default(),
            load_font: None,
            subtitle_list: SubtitleList::default(),
        }
    }
}

impl SubtitleReel {
    /// First two characters of the edit rate, the frame rate a template carries
    pub fn frame_rate_prefix(&self) -> String {
        self.edit_rate.chars().take(2).collect::<String>().trim().to_string()
    }

    /// All subtitle events across style blocks, in document order
    pub fn subtitles(&self) -> impl Iterator<Item = &Subtitle> {
        self.subtitle_list.fonts.iter().flat_map(|font| font.subtitles.iter())
    }
}

/// Embedded font declaration
#[derive(Debug, Clone, PartialEq)]
pub struct LoadFont {
    /// Value of the ID attribute
    pub id: String,
    /// Font resource identifier
    pub font: String,
}

impl Default for LoadFont {
    fn default() -> Self {
        Self {
            id: LOAD_FONT_NAME.to_string(),
            font: FONT_ID.to_string(),
        }
    }
}

/// SubtitleList container
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubtitleList {
    pub fonts: Vec<Font>,
}

/// Font style block. Every attribute is optional and omitted when unset.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Font {
    pub id: Option<String>,
    pub weight: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub effect: Option<String>,
    pub effect_color: Option<String>,
    pub effect_size: Option<String>,
    pub italic: Option<String>,
    pub underline: Option<String>,
    pub aspect_adjust: Option<String>,
    pub spacing: Option<String>,
    pub feather: Option<String>,
    pub subtitles: Vec<Subtitle>,
}

impl Font {
    /// Style attributes in schema order, skipping unset ones
    pub fn attributes(&self) -> Vec<(&'static str, &str)> {
        [
            ("ID", &self.id),
            ("Weight", &self.weight),
            ("Size", &self.size),
            ("Color", &self.color),
            ("Effect", &self.effect),
            ("EffectColor", &self.effect_color),
            ("EffectSize", &self.effect_size),
            ("Italic", &self.italic),
            ("Underline", &self.underline),
            ("AspectAdjust", &self.aspect_adjust),
            ("Spacing", &self.spacing),
            ("Feather", &self.feather),
        ]
        .into_iter()
        .filter_map(|(name, value)| present(value).map(|v| (name, v)))
        .collect()
    }
}

/// Payload of a subtitle event
#[derive(Debug, Clone, PartialEq)]
pub enum SubtitleContent {
    Text(Vec<Text>),
    Image(Vec<Image>),
}

/// One timed subtitle event
#[derive(Debug, Clone, PartialEq)]
pub struct Subtitle {
    pub spot_number: Option<String>,
    pub time_in: String,
    pub time_out: String,
    pub fade_up_time: Option<String>,
    pub fade_down_time: Option<String>,
    pub content: SubtitleContent,
}

impl Subtitle {
    /// Event carrying text runs
    pub fn with_text(time_in: String, time_out: String, runs: Vec<Text>) -> Self {
        Self {
            spot_number: None,
            time_in,
            time_out,
            fade_up_time: None,
            fade_down_time: None,
            content: SubtitleContent::Text(runs),
        }
    }

    /// Event carrying image references
    pub fn with_images(time_in: String, time_out: String, images: Vec<Image>) -> Self {
        Self {
            spot_number: None,
            time_in,
            time_out,
            fade_up_time: None,
            fade_down_time: None,
            content: SubtitleContent::Image(images),
        }
    }

    pub fn attributes(&self) -> Vec<(&'static str, &str)> {
        let mut attributes = Vec::with_capacity(5);
        if let Some(spot) = present(&self.spot_number) {
            attributes.push(("SpotNumber", spot));
        }
        attributes.push(("TimeIn", self.time_in.as_str()));
        attributes.push(("TimeOut", self.time_out.as_str()));
        if let Some(fade) = present(&self.fade_up_time) {
            attributes.push(("FadeUpTime", fade));
        }
        if let Some(fade) = present(&self.fade_down_time) {
            attributes.push(("FadeDownTime", fade));
        }
        attributes
    }
}

/// A run of text
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Text {
    pub text: String,
    pub halign: Option<String>,
    pub hposition: Option<String>,
    pub valign: Option<String>,
    pub vposition: Option<String>,
    pub direction: Option<String>,
}

impl Text {
    /// Empty placeholder run
    pub fn placeholder() -> Self {
        Self::default()
    }

    pub fn attributes(&self) -> Vec<(&'static str, &str)> {
        [
            ("Halign", &self.halign),
            ("Hposition", &self.hposition),
            ("Valign", &self.valign),
            ("Vposition", &self.vposition),
            ("Direction", &self.direction),
        ]
        .into_iter()
        .filter_map(|(name, value)| present(value).map(|v| (name, v)))
        .collect()
    }
}

/// Reference to a raster asset
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Image {
    /// urn:uuid of the PNG asset
    pub uri: String,
    pub halign: Option<String>,
    pub hposition: Option<String>,
    pub valign: Option<String>,
    pub vposition: Option<String>,
}

impl Image {
    pub fn new(uri: String) -> Self {
        Self {
            uri,
            ..Self::default()
        }
    }

    pub fn attributes(&self) -> Vec<(&'static str, &str)> {
        [
            ("Halign", &self.halign),
            ("Hposition", &self.hposition),
            ("Valign", &self.valign),
            ("Vposition", &self.vposition),
        ]
        .into_iter()
        .filter_map(|(name, value)| present(value).map(|v| (name, v)))
        .collect()
    }
}

// Optional attribute value, empty strings count as unset
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
