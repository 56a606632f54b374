/*!
 * Template loading for subtitle reels.
 *
 * A template is an existing ST 428-7 document whose global properties (title,
 * language, edit rate, display type and schema namespace) are reused for the
 * reel being synthesized. Only the header is decoded, the template's own
 * events are ignored.
 */

use std::fs;
use std::path::Path;

use log::debug;
use quick_xml::events::Event;
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;
use serde::Deserialize;

use super::model::SubtitleReel;
use super::{DisplayType, SchemaRevision, DCST_2007_NAMESPACE};
use crate::errors::TemplateError;

// @struct: Global properties of a template, everything else is skipped
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ReelHeader {
    #[serde(rename = "Id")]
    id: Option<String>,
    #[serde(rename = "ContentTitleText")]
    content_title_text: Option<String>,
    #[serde(rename = "IssueDate")]
    issue_date: Option<String>,
    #[serde(rename = "ReelNumber")]
    reel_number: Option<String>,
    #[serde(rename = "Language")]
    language: Option<String>,
    #[serde(rename = "EditRate")]
    edit_rate: Option<String>,
    #[serde(rename = "TimeCodeRate")]
    time_code_rate: Option<String>,
    #[serde(rename = "StartTime")]
    start_time: Option<String>,
    #[serde(rename = "DisplayType")]
    display_type: Option<String>,
}

// @struct: Root element name and resolved namespace
#[derive(Debug, Default)]
struct RootProbe {
    local_name: String,
    namespace: Option<String>,
}

/// Values a template imposes on the reel being synthesized
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateOverrides {
    pub namespace: String,
    pub title: String,
    pub language: String,
    /// Leading two characters of the template's EditRate, None when empty
    pub frame_rate: Option<String>,
    /// Display index for a recognized DisplayType, None leaves the caller's value
    pub display_index: Option<u32>,
}

impl TemplateOverrides {
    /// Load a template and extract the values it overrides
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TemplateError> {
        let (namespace, header) = read_template(path.as_ref())?;
        let reel = header_to_reel(namespace, &header);
        let frame_rate = reel.frame_rate_prefix();

        Ok(Self {
            namespace: reel.namespace,
            title: reel.content_title_text,
            language: reel.language,
            frame_rate: (!frame_rate.is_empty()).then_some(frame_rate),
            display_index: header
                .display_type
                .as_deref()
                .and_then(|value| value.parse::<DisplayType>().ok())
                .map(|display| display.index()),
        })
    }
}

/// Parse a template document into a reel carrying its global properties.
///
/// The reel's subtitle list is left empty. An unrecognized DisplayType falls
/// back to MainSubtitle.
pub fn parse_template<P: AsRef<Path>>(path: P) -> Result<SubtitleReel, TemplateError> {
    let (namespace, header) = read_template(path.as_ref())?;
    Ok(header_to_reel(namespace, &header))
}

fn read_template(path: &Path) -> Result<(String, ReelHeader), TemplateError> {
    let is_xml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"));
    if !is_xml {
        return Err(TemplateError::Undetermined(format!(
            "unrecognized extension: {:?}",
            path
        )));
    }

    let content = fs::read_to_string(path).map_err(|source| TemplateError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    // Decode first, the namespace is checked even if the body is broken
    let decoded = quick_xml::de::from_str::<ReelHeader>(&content);
    let probe = probe_root(&content);
    let namespace = probe.namespace.unwrap_or_default();

    if namespace == DCST_2007_NAMESPACE {
        return Err(TemplateError::InvalidNamespace(namespace));
    }

    let revision = SchemaRevision::from_namespace(&namespace).ok_or_else(|| {
        TemplateError::Undetermined(format!("unrecognized namespace {:?}", namespace))
    })?;

    if probe.local_name != "SubtitleReel" {
        return Err(TemplateError::Undetermined(format!(
            "unexpected root element {:?}",
            probe.local_name
        )));
    }

    let header = decoded
        .map_err(|e| TemplateError::Undetermined(format!("unable to decode template: {}", e)))?;

    debug!("Template {:?} uses schema {}", path, revision.tag());
    Ok((namespace, header))
}

fn header_to_reel(namespace: String, header: &ReelHeader) -> SubtitleReel {
    let text = |value: &Option<String>| value.as_deref().unwrap_or_default().trim().to_string();

    let mut reel = SubtitleReel {
        namespace,
        id: text(&header.id),
        content_title_text: text(&header.content_title_text),
        issue_date: text(&header.issue_date),
        language: text(&header.language),
        edit_rate: text(&header.edit_rate),
        time_code_rate: text(&header.time_code_rate),
        start_time: text(&header.start_time),
        ..SubtitleReel::default()
    };

    if let Some(reel_number) = header.reel_number.as_deref().and_then(|v| v.trim().parse().ok()) {
        reel.reel_number = reel_number;
    }
    if let Some(display_type) = header.display_type.as_deref().and_then(|v| v.parse().ok()) {
        reel.display_type = display_type;
    }

    reel
}

// Find the first element and resolve its namespace
fn probe_root(content: &str) -> RootProbe {
    let mut reader = NsReader::from_str(content);

    loop {
        match reader.read_resolved_event() {
            Ok((resolved, Event::Start(element))) | Ok((resolved, Event::Empty(element))) => {
                let namespace = match resolved {
                    ResolveResult::Bound(ns) => Some(String::from_utf8_lossy(ns.0).into_owned()),
                    _ => None,
                };
                return RootProbe {
                    local_name: String::from_utf8_lossy(element.local_name().as_ref()).into_owned(),
                    namespace,
                };
            }
            Ok((_, Event::Eof)) | Err(_) => return RootProbe::default(),
            Ok(_) => continue,
        }
    }
}
